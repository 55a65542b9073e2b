//! Estimation-of-distribution driver for any [`Model`].
//!
//! Each generation samples `lambda` candidates from the model, evaluates
//! them, and feeds the `mu` best back into [`Model::update`], best first.
//! Values are minimized.
//!
//! # Examples
//!
//! ```
//! use paco::eda::Eda;
//! use paco::jssp::{JsspInstance, JsspSequence};
//! use paco::model::paco::PacoModel;
//!
//! let instance = JsspInstance::demo();
//! let mut model = PacoModel::builder(instance.operations())
//!     .population_size(3)
//!     .q0(0.5)
//!     .build_with(JsspSequence::new(&instance))
//!     .unwrap();
//!
//! let eda = Eda::builder()
//!     .mu(2)
//!     .lambda(8)
//!     .max_generations(20)
//!     .build()
//!     .unwrap();
//!
//! let mut rng = fastrand::Rng::with_seed(42);
//! let result = eda
//!     .run(&mut model, |ant| ant.makespan() as f64, &mut rng)
//!     .unwrap();
//!
//! assert_eq!(result.evaluations, 160);
//! assert!(result.best_value >= instance.lower_bound() as f64);
//! ```

use crate::error::{Error, Result};
use crate::model::Model;

/// Outcome of an [`Eda::run`].
#[derive(Clone, Debug)]
pub struct EdaResult<C> {
    /// The best candidate evaluated.
    pub best: C,
    /// Objective value of [`best`](Self::best).
    pub best_value: f64,
    /// Number of completed generations, each followed by a model update.
    pub generations: usize,
    /// Number of objective evaluations.
    pub evaluations: u64,
}

/// Builder for configuring an [`Eda`].
///
/// Defaults: `mu` = 2, `lambda` = 10, no budget. At least one of
/// [`max_generations`](Self::max_generations) and
/// [`max_evaluations`](Self::max_evaluations) must be set.
#[derive(Clone, Debug)]
pub struct EdaBuilder {
    mu: usize,
    lambda: usize,
    max_generations: Option<usize>,
    max_evaluations: Option<u64>,
}

impl Default for EdaBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl EdaBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            mu: 2,
            lambda: 10,
            max_generations: None,
            max_evaluations: None,
        }
    }

    /// Sets how many of the best candidates update the model each generation.
    #[must_use]
    pub fn mu(mut self, mu: usize) -> Self {
        self.mu = mu;
        self
    }

    /// Sets how many candidates are sampled each generation.
    #[must_use]
    pub fn lambda(mut self, lambda: usize) -> Self {
        self.lambda = lambda;
        self
    }

    /// Stops after this many generations.
    #[must_use]
    pub fn max_generations(mut self, generations: usize) -> Self {
        self.max_generations = Some(generations);
        self
    }

    /// Stops after this many objective evaluations, even mid-generation.
    #[must_use]
    pub fn max_evaluations(mut self, evaluations: u64) -> Self {
        self.max_evaluations = Some(evaluations);
        self
    }

    /// Builds the configured [`Eda`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSelection`] unless `1 <= mu <= lambda`, and
    /// [`Error::InvalidBudget`] if no budget is set or a budget is zero.
    pub fn build(self) -> Result<Eda> {
        if self.mu == 0 || self.mu > self.lambda {
            return Err(Error::InvalidSelection {
                mu: self.mu,
                lambda: self.lambda,
                minimum: 1,
            });
        }
        let has_budget = match (self.max_generations, self.max_evaluations) {
            (None, None) => false,
            (generations, evaluations) => {
                generations.is_none_or(|g| g > 0) && evaluations.is_none_or(|e| e > 0)
            }
        };
        if !has_budget {
            return Err(Error::InvalidBudget);
        }
        Ok(Eda {
            mu: self.mu,
            lambda: self.lambda,
            max_generations: self.max_generations,
            max_evaluations: self.max_evaluations,
        })
    }
}

/// A (mu, lambda) estimation-of-distribution algorithm.
#[derive(Clone, Debug)]
pub struct Eda {
    mu: usize,
    lambda: usize,
    max_generations: Option<usize>,
    max_evaluations: Option<u64>,
}

impl Eda {
    /// Creates a builder for configuring an `Eda`.
    #[must_use]
    pub fn builder() -> EdaBuilder {
        EdaBuilder::new()
    }

    /// Candidates passed to the model per generation.
    #[must_use]
    pub fn mu(&self) -> usize {
        self.mu
    }

    /// Candidates sampled per generation.
    #[must_use]
    pub fn lambda(&self) -> usize {
        self.lambda
    }

    /// Runs the algorithm from a freshly initialized `model`.
    ///
    /// `objective` must return comparable (non-NaN) values. Ties keep the
    /// candidate sampled first, both for selection and for the best result.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSelection`] if `mu` is below the model's
    /// [`minimum_samples_needed_for_update`](Model::minimum_samples_needed_for_update).
    pub fn run<M, F>(
        &self,
        model: &mut M,
        mut objective: F,
        rng: &mut fastrand::Rng,
    ) -> Result<EdaResult<M::Candidate>>
    where
        M: Model,
        M::Candidate: Clone,
        F: FnMut(&M::Candidate) -> f64,
    {
        let minimum = model.minimum_samples_needed_for_update();
        if self.mu < minimum {
            return Err(Error::InvalidSelection {
                mu: self.mu,
                lambda: self.lambda,
                minimum,
            });
        }

        #[cfg(feature = "tracing")]
        let _span = tracing::info_span!("eda", mu = self.mu, lambda = self.lambda).entered();

        model.initialize();
        let mut population: Vec<M::Candidate> =
            (0..self.lambda).map(|_| model.new_candidate()).collect();
        let mut values = vec![0.0; self.lambda];
        let mut order: Vec<usize> = Vec::with_capacity(self.lambda);

        let mut best: Option<(M::Candidate, f64)> = None;
        let mut generations = 0;
        let mut evaluations: u64 = 0;

        'run: loop {
            if self.max_generations.is_some_and(|g| generations >= g) {
                break;
            }

            for (candidate, value) in population.iter_mut().zip(values.iter_mut()) {
                if self.max_evaluations.is_some_and(|e| evaluations >= e) {
                    break 'run;
                }
                model.sample(candidate, rng);
                *value = objective(candidate);
                evaluations += 1;

                if best.as_ref().is_none_or(|(_, b)| *value < *b) {
                    best = Some((candidate.clone(), *value));
                    trace_info!(generation = generations, value = *value, "new best candidate");
                }
            }

            order.clear();
            order.extend(0..self.lambda);
            order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));
            model.update(order[..self.mu].iter().map(|&i| &population[i]));
            generations += 1;
        }

        trace_info!(generations, evaluations, "eda finished");

        let Some((best, best_value)) = best else {
            return Err(Error::InvalidBudget);
        };
        Ok(EdaResult {
            best,
            best_value,
            generations,
            evaluations,
        })
    }
}
