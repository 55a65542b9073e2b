//! Job-shop scheduling instances.

use crate::error::{Error, Result};

/// A job-shop instance: every job visits every machine once, in a fixed order.
///
/// # Examples
///
/// ```
/// use paco::jssp::JsspInstance;
///
/// let instance = JsspInstance::new(2, 2, vec![
///     vec![(0, 3), (1, 2)],
///     vec![(1, 4), (0, 1)],
/// ]).unwrap();
///
/// assert_eq!(instance.operations(), 4);
/// assert_eq!(instance.makespan(&[0, 2, 1, 3]), 6);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawInstance")
)]
pub struct JsspInstance {
    machines: usize,
    jobs: usize,
    /// `routes[j][k]` is the machine and duration of the k-th operation of job j.
    routes: Vec<Vec<(usize, u64)>>,
}

/// Unvalidated wire form of a [`JsspInstance`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawInstance {
    machines: usize,
    jobs: usize,
    routes: Vec<Vec<(usize, u64)>>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawInstance> for JsspInstance {
    type Error = Error;

    fn try_from(raw: RawInstance) -> Result<Self> {
        Self::new(raw.machines, raw.jobs, raw.routes)
    }
}

impl JsspInstance {
    /// Creates an instance from per-job routes of `(machine, duration)` pairs.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInstance`] if there are no jobs or machines, the
    /// number of routes differs from `jobs`, or a route does not visit every
    /// machine exactly once.
    pub fn new(machines: usize, jobs: usize, routes: Vec<Vec<(usize, u64)>>) -> Result<Self> {
        if machines == 0 || jobs == 0 {
            return Err(Error::InvalidInstance(format!(
                "need at least one job and one machine, got {jobs} jobs and {machines} machines"
            )));
        }
        if routes.len() != jobs {
            return Err(Error::InvalidInstance(format!(
                "expected {jobs} routes, got {}",
                routes.len()
            )));
        }
        for (job, route) in routes.iter().enumerate() {
            let mut visited = vec![false; machines];
            for &(machine, _) in route {
                match visited.get_mut(machine) {
                    Some(seen) if !*seen => *seen = true,
                    Some(_) => {
                        return Err(Error::InvalidInstance(format!(
                            "job {job} visits machine {machine} twice"
                        )));
                    }
                    None => {
                        return Err(Error::InvalidInstance(format!(
                            "job {job} uses unknown machine {machine}"
                        )));
                    }
                }
            }
            if route.len() != machines {
                return Err(Error::InvalidInstance(format!(
                    "job {job} has {} operations, expected {machines}",
                    route.len()
                )));
            }
        }
        Ok(Self {
            machines,
            jobs,
            routes,
        })
    }

    /// A small instance with 4 jobs on 5 machines.
    #[must_use]
    pub fn demo() -> Self {
        Self {
            machines: 5,
            jobs: 4,
            routes: vec![
                vec![(0, 10), (1, 20), (2, 20), (3, 40), (4, 10)],
                vec![(1, 20), (0, 10), (3, 30), (2, 50), (4, 30)],
                vec![(2, 30), (1, 20), (4, 12), (3, 40), (0, 10)],
                vec![(4, 50), (3, 30), (2, 15), (0, 20), (1, 15)],
            ],
        }
    }

    /// Number of machines.
    #[must_use]
    pub fn machines(&self) -> usize {
        self.machines
    }

    /// Number of jobs.
    #[must_use]
    pub fn jobs(&self) -> usize {
        self.jobs
    }

    /// Total number of operations, which is the permutation length.
    #[must_use]
    pub fn operations(&self) -> usize {
        self.jobs * self.machines
    }

    /// The job an operation slot of the permutation stands for.
    #[must_use]
    pub fn job_of(&self, value: usize) -> usize {
        value / self.machines
    }

    /// The `(machine, duration)` of the `step`-th operation of `job`.
    #[must_use]
    pub fn operation(&self, job: usize, step: usize) -> (usize, u64) {
        self.routes[job][step]
    }

    /// Longest total processing time of a single job or machine.
    ///
    /// No schedule can finish earlier.
    #[must_use]
    pub fn lower_bound(&self) -> u64 {
        let mut machine_load = vec![0u64; self.machines];
        let mut bound = 0;
        for route in &self.routes {
            let mut job_load = 0;
            for &(machine, duration) in route {
                job_load += duration;
                machine_load[machine] += duration;
            }
            bound = bound.max(job_load);
        }
        machine_load.into_iter().fold(bound, u64::max)
    }

    /// Decodes a permutation of operation slots and returns its makespan.
    ///
    /// The k-th occurrence of a job's slot schedules that job's k-th
    /// operation as early as its job and machine allow.
    ///
    /// # Panics
    ///
    /// Panics if `permutation` does not have [`operations`](Self::operations) elements.
    #[must_use]
    pub fn makespan(&self, permutation: &[usize]) -> u64 {
        assert_eq!(
            permutation.len(),
            self.operations(),
            "permutation length must match the operation count"
        );
        let mut job_time = vec![0u64; self.jobs];
        let mut machine_time = vec![0u64; self.machines];
        let mut job_step = vec![0usize; self.jobs];
        let mut makespan = 0;

        for &value in permutation {
            let job = self.job_of(value);
            let (machine, duration) = self.operation(job, job_step[job]);
            let end = job_time[job].max(machine_time[machine]) + duration;
            job_time[job] = end;
            machine_time[machine] = end;
            job_step[job] += 1;
            makespan = makespan.max(end);
        }
        makespan
    }
}
