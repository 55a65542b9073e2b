//! Ants that build job-shop schedules operation by operation.

use crate::jssp::JsspInstance;
use crate::sequence::SequenceModel;

/// A permutation of operation slots plus the partial schedule it encodes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JsspAnt {
    permutation: Vec<usize>,
    job_time: Vec<u64>,
    machine_time: Vec<u64>,
    job_step: Vec<usize>,
    makespan: u64,
}

impl JsspAnt {
    /// Creates an empty ant for `instance`.
    #[must_use]
    pub fn new(instance: &JsspInstance) -> Self {
        Self {
            permutation: vec![0; instance.operations()],
            job_time: vec![0; instance.jobs()],
            machine_time: vec![0; instance.machines()],
            job_step: vec![0; instance.jobs()],
            makespan: 0,
        }
    }

    /// The operation slots in placement order.
    #[must_use]
    pub fn permutation(&self) -> &[usize] {
        &self.permutation
    }

    /// Finish time of the operations appended so far.
    #[must_use]
    pub fn makespan(&self) -> u64 {
        self.makespan
    }

    fn reset(&mut self) {
        self.job_time.fill(0);
        self.machine_time.fill(0);
        self.job_step.fill(0);
        self.makespan = 0;
    }
}

/// Candidate encoding that schedules while the ant walks.
///
/// The cost of appending a slot is the finish time its operation would
/// get, so with `beta > 0` operations that can complete early are favored.
///
/// # Examples
///
/// ```
/// use paco::jssp::{JsspInstance, JsspSequence};
/// use paco::model::Model;
/// use paco::model::paco::PacoModel;
///
/// let instance = JsspInstance::demo();
/// let mut model = PacoModel::builder(instance.operations())
///     .beta(2.0)
///     .build_with(JsspSequence::new(&instance))
///     .unwrap();
///
/// let mut ant = model.new_candidate();
/// model.initialize();
/// model.sample(&mut ant, &mut fastrand::Rng::with_seed(3));
///
/// assert_eq!(ant.makespan(), instance.makespan(ant.permutation()));
/// assert!(ant.makespan() >= instance.lower_bound());
/// ```
#[derive(Clone, Copy, Debug)]
pub struct JsspSequence<'a> {
    instance: &'a JsspInstance,
}

impl<'a> JsspSequence<'a> {
    /// Creates the encoding for `instance`.
    #[must_use]
    pub fn new(instance: &'a JsspInstance) -> Self {
        Self { instance }
    }

    /// The instance being scheduled.
    #[must_use]
    pub fn instance(&self) -> &'a JsspInstance {
        self.instance
    }

    /// Machine and `(start, end)` the next operation of `value`'s job would get.
    fn next_operation(&self, value: usize, ant: &JsspAnt) -> (usize, u64, u64) {
        let job = self.instance.job_of(value);
        let (machine, duration) = self.instance.operation(job, ant.job_step[job]);
        let start = ant.job_time[job].max(ant.machine_time[machine]);
        (machine, start, start + duration)
    }
}

impl SequenceModel for JsspSequence<'_> {
    type Candidate = JsspAnt;

    fn new_candidate(&self, length: usize) -> JsspAnt {
        debug_assert_eq!(length, self.instance.operations());
        JsspAnt::new(self.instance)
    }

    fn permutation<'b>(&self, candidate: &'b JsspAnt) -> &'b [usize] {
        &candidate.permutation
    }

    fn permutation_mut<'b>(&self, candidate: &'b mut JsspAnt) -> &'b mut [usize] {
        &mut candidate.permutation
    }

    #[allow(clippy::cast_precision_loss)]
    fn cost_of_appending(&self, value: usize, candidate: &JsspAnt) -> f64 {
        let (_, _, end) = self.next_operation(value, candidate);
        end.max(1) as f64
    }

    fn start(&self, candidate: &mut JsspAnt) {
        candidate.reset();
    }

    fn append(&self, value: usize, candidate: &mut JsspAnt) {
        let (machine, _, end) = self.next_operation(value, candidate);
        let job = self.instance.job_of(value);
        candidate.job_time[job] = end;
        candidate.machine_time[machine] = end;
        candidate.job_step[job] += 1;
        candidate.makespan = candidate.makespan.max(end);
    }
}
