//! Population-based Ant Colony Optimization (PACO) model over permutations.
//!
//! PACO replaces the evaporating pheromone matrix of classical ant colony
//! optimization by a small, age-ordered population of good permutations.
//! The pheromone on an edge is derived from how many resident permutations
//! contain it, so admitting a permutation adds its edges and evicting the
//! oldest one removes them again, exactly.
//!
//! # Algorithm overview
//!
//! Pheromone on the edge `(a, b)`, where `a` may be the virtual start node:
//!
//! ```text
//! tau(a, b) = tau0 + count(a, b) * (tau_max - tau0) / K,   tau0 = 1 / (L - 1)
//! ```
//!
//! which stays within `[tau0, tau_max]` since a count never exceeds `K`.
//!
//! A new permutation is built left to right. At each step every element not
//! placed yet is scored with `tau(last, c) * cost(c)^-beta`, where the cost
//! comes from the [`SequenceModel`]. With probability `q0` the best-scored
//! element is taken, otherwise one is drawn proportionally to its score.
//!
//! # Configuration
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `length` (L) | required | Number of elements per permutation, in `[2, 1_000_000]` |
//! | `population_size` (K) | 3 | Resident permutations; the oldest is evicted first |
//! | `q0` | 0.5 | Probability of a greedy choice at each step |
//! | `beta` | 2.0 | Exponent applied to the inverse cost heuristic |
//! | `tau_max` | 1.0 | Pheromone of an edge present in every resident permutation |
//!
//! # Examples
//!
//! ```
//! use paco::model::Model;
//! use paco::model::paco::PacoModel;
//!
//! let mut model = PacoModel::builder(6)
//!     .population_size(4)
//!     .q0(0.3)
//!     .beta(0.0)
//!     .build()
//!     .unwrap();
//!
//! let mut rng = fastrand::Rng::with_seed(42);
//! model.initialize();
//!
//! let mut a = model.new_candidate();
//! let mut b = model.new_candidate();
//! model.sample(&mut a, &mut rng);
//! model.sample(&mut b, &mut rng);
//! model.update([&a, &b]);
//!
//! assert_eq!(model.population_len(), 2);
//! ```

use core::fmt;

use crate::edges::EdgeTable;
use crate::error::{Error, Result};
use crate::model::Model;
use crate::pool::NodePool;
use crate::sequence::{PermutationSequence, SequenceModel};

/// Shortest permutation a model accepts.
pub const MIN_LENGTH: usize = 2;

/// Longest permutation a model accepts.
pub const MAX_LENGTH: usize = 1_000_000;

const MINIMUM_SAMPLES_FOR_UPDATE: usize = 2;

/// Validated, immutable configuration of a [`PacoModel`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PacoConfig {
    length: usize,
    population_size: usize,
    q0: f64,
    beta: f64,
    tau_max: f64,
}

impl PacoConfig {
    /// Creates and validates a configuration.
    ///
    /// # Errors
    ///
    /// Returns the [`Error`] variant naming the first invalid setting.
    pub fn new(
        length: usize,
        population_size: usize,
        q0: f64,
        beta: f64,
        tau_max: f64,
    ) -> Result<Self> {
        let config = Self {
            length,
            population_size,
            q0,
            beta,
            tau_max,
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if !(MIN_LENGTH..=MAX_LENGTH).contains(&self.length) {
            return Err(Error::InvalidLength(self.length));
        }
        if self.population_size == 0 || u32::try_from(self.population_size).is_err() {
            return Err(Error::InvalidPopulationSize(self.population_size));
        }
        if !self.q0.is_finite() || !(0.0..=1.0).contains(&self.q0) {
            return Err(Error::InvalidGreedyProbability(self.q0));
        }
        if !self.beta.is_finite() || self.beta < 0.0 {
            return Err(Error::InvalidBeta(self.beta));
        }

        let tau0 = self.tau0();
        if !self.tau_max.is_finite() || self.tau_max < tau0 {
            return Err(Error::InvalidTauMax {
                tau_max: self.tau_max,
                tau0,
            });
        }

        let multiplier = self.pheromone_multiplier();
        if !tau0.is_finite() || tau0 <= 0.0 || !multiplier.is_finite() || multiplier < 0.0 {
            return Err(Error::DegeneratePheromone { tau0, multiplier });
        }
        Ok(())
    }

    /// Number of elements per permutation (L).
    #[must_use]
    pub fn length(&self) -> usize {
        self.length
    }

    /// Capacity of the population (K).
    #[must_use]
    pub fn population_size(&self) -> usize {
        self.population_size
    }

    /// Probability of a greedy choice at each construction step.
    #[must_use]
    pub fn q0(&self) -> f64 {
        self.q0
    }

    /// Exponent of the inverse cost heuristic.
    #[must_use]
    pub fn beta(&self) -> f64 {
        self.beta
    }

    /// Pheromone of an edge contained in every resident permutation.
    #[must_use]
    pub fn tau_max(&self) -> f64 {
        self.tau_max
    }

    /// Pheromone of an edge no resident permutation contains: `1 / (L - 1)`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn tau0(&self) -> f64 {
        1.0 / (self.length.saturating_sub(1) as f64)
    }

    /// Pheromone added per resident permutation containing an edge.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn pheromone_multiplier(&self) -> f64 {
        (self.tau_max - self.tau0()) / self.population_size as f64
    }
}

impl fmt::Display for PacoConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "L: {}", self.length)?;
        writeln!(f, "K: {}", self.population_size)?;
        writeln!(f, "tau0: {}", self.tau0())?;
        writeln!(f, "tauMax: {}", self.tau_max)?;
        writeln!(f, "beta: {}", self.beta)?;
        write!(f, "q0: {}", self.q0)
    }
}

/// Builder for configuring a [`PacoModel`].
///
/// # Examples
///
/// ```
/// use paco::model::paco::PacoModelBuilder;
///
/// let model = PacoModelBuilder::new(10)
///     .population_size(5)
///     .q0(0.9)
///     .beta(1.5)
///     .tau_max(2.0)
///     .build()
///     .unwrap();
///
/// assert_eq!(model.config().population_size(), 5);
/// ```
#[derive(Clone, Debug)]
pub struct PacoModelBuilder {
    length: usize,
    population_size: usize,
    q0: f64,
    beta: f64,
    tau_max: f64,
}

impl PacoModelBuilder {
    /// Creates a builder for permutations of `length` elements with default settings.
    #[must_use]
    pub fn new(length: usize) -> Self {
        Self {
            length,
            population_size: 3,
            q0: 0.5,
            beta: 2.0,
            tau_max: 1.0,
        }
    }

    /// Sets the population capacity (K).
    ///
    /// Default: 3.
    #[must_use]
    pub fn population_size(mut self, size: usize) -> Self {
        self.population_size = size;
        self
    }

    /// Sets the probability of a greedy choice.
    ///
    /// `1.0` always takes the best-scored element, `0.0` always draws
    /// proportionally to the scores.
    ///
    /// Default: 0.5.
    #[must_use]
    pub fn q0(mut self, q0: f64) -> Self {
        self.q0 = q0;
        self
    }

    /// Sets the exponent of the inverse cost heuristic.
    ///
    /// `0.0` ignores the cost entirely.
    ///
    /// Default: 2.0.
    #[must_use]
    pub fn beta(mut self, beta: f64) -> Self {
        self.beta = beta;
        self
    }

    /// Sets the maximum pheromone.
    ///
    /// Default: 1.0.
    #[must_use]
    pub fn tau_max(mut self, tau_max: f64) -> Self {
        self.tau_max = tau_max;
        self
    }

    /// Builds a model whose candidates are plain `Vec<usize>` permutations.
    ///
    /// # Errors
    ///
    /// Returns an error if any setting is invalid.
    pub fn build(self) -> Result<PacoModel> {
        self.build_with(PermutationSequence)
    }

    /// Builds a model using `sequence` to access and score candidates.
    ///
    /// # Errors
    ///
    /// Returns an error if any setting is invalid.
    pub fn build_with<S: SequenceModel>(self, sequence: S) -> Result<PacoModel<S>> {
        let config = PacoConfig::new(
            self.length,
            self.population_size,
            self.q0,
            self.beta,
            self.tau_max,
        )?;
        PacoModel::from_config(config, sequence)
    }
}

/// Population-based ACO model sampling permutations of `0..L`.
///
/// The population is a ring buffer of `K` permutations: once full, each
/// admitted permutation overwrites the oldest one. The [`EdgeTable`] always
/// holds the aggregate edges of exactly the resident permutations.
pub struct PacoModel<S: SequenceModel = PermutationSequence> {
    config: PacoConfig,
    tau0: f64,
    multiplier: f64,
    sequence: S,
    edges: EdgeTable,

    // --- Population ring buffer ---
    /// Slot buffers, allocated on first use and reused after `initialize`.
    population: Vec<Vec<usize>>,
    /// Number of resident permutations, at most K.
    size: usize,
    /// Slot written by the next admitted permutation.
    cursor: usize,

    // --- Construction scratch ---
    pool: NodePool,
    cumulative: Vec<f64>,
}

impl PacoModel {
    /// Creates a builder for permutations of `length` elements.
    #[must_use]
    pub fn builder(length: usize) -> PacoModelBuilder {
        PacoModelBuilder::new(length)
    }
}

impl<S: SequenceModel> PacoModel<S> {
    /// Creates a model from a configuration, validating it again.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid, which can happen
    /// for deserialized configurations.
    pub fn from_config(config: PacoConfig, sequence: S) -> Result<Self> {
        config.validate()?;
        let length = config.length;
        Ok(Self {
            tau0: config.tau0(),
            multiplier: config.pheromone_multiplier(),
            config,
            sequence,
            edges: EdgeTable::new(length),
            population: Vec::new(),
            size: 0,
            cursor: 0,
            pool: NodePool::new(length),
            cumulative: vec![0.0; length],
        })
    }

    /// The validated configuration.
    #[must_use]
    pub fn config(&self) -> &PacoConfig {
        &self.config
    }

    /// The candidate encoding.
    #[must_use]
    pub fn sequence(&self) -> &S {
        &self.sequence
    }

    /// Edge counts of the resident permutations.
    #[must_use]
    pub fn edges(&self) -> &EdgeTable {
        &self.edges
    }

    /// Number of resident permutations.
    #[must_use]
    pub fn population_len(&self) -> usize {
        self.size
    }

    /// The resident permutations in slot order.
    pub fn population(&self) -> impl Iterator<Item = &[usize]> {
        self.population[..self.size].iter().map(Vec::as_slice)
    }

    /// Pheromone on the edge from `predecessor` (`None` for the start) to `successor`.
    #[must_use]
    pub fn pheromone(&self, predecessor: Option<usize>, successor: usize) -> f64 {
        self.tau0 + f64::from(self.edges.count(predecessor, successor)) * self.multiplier
    }

    /// Score of appending `node` after `last` to the partial `candidate`.
    ///
    /// # Panics
    ///
    /// Panics if the cost hook returns a non-positive value.
    #[must_use]
    pub fn desirability(&self, last: Option<usize>, node: usize, candidate: &S::Candidate) -> f64 {
        let cost = self.sequence.cost_of_appending(node, candidate);
        assert!(
            cost > 0.0,
            "cost of appending {node} must be positive, got {cost}"
        );
        let tau = self.pheromone(last, node);
        if self.config.beta == 0.0 {
            tau
        } else {
            tau * cost.powf(-self.config.beta)
        }
    }

    fn admit(&mut self, permutation: &[usize]) {
        let capacity = self.config.population_size;
        if self.size == capacity {
            self.edges.remove_permutation(&self.population[self.cursor]);
        }

        if let Some(slot) = self.population.get_mut(self.cursor) {
            slot.copy_from_slice(permutation);
        } else {
            self.population.push(permutation.to_vec());
        }
        self.edges.add_permutation(permutation);

        self.cursor = (self.cursor + 1) % capacity;
        if self.size < capacity {
            self.size += 1;
        }
    }

    /// Picks the next element among those still in the pool.
    fn choose_next(
        &mut self,
        last: Option<usize>,
        candidate: &S::Candidate,
        rng: &mut fastrand::Rng,
    ) -> usize {
        let remaining = self.pool.len();
        if remaining == 1 {
            return self.pool.get(0);
        }

        // Decided up front so greedy steps skip the cumulative table.
        let greedy = rng.f64() < self.config.q0;

        let mut best = self.pool.get(0);
        let mut best_value = f64::NEG_INFINITY;
        for i in 0..remaining {
            let node = self.pool.get(i);
            let value = self.desirability(last, node, candidate);
            if value > best_value {
                best_value = value;
                best = node;
            }
            self.cumulative[i] = value;
        }

        if greedy {
            return best;
        }

        let table = &mut self.cumulative[..remaining];
        let sum = accumulate(table);
        let draw = rng.f64() * sum;
        self.pool.get(roulette_slot(table, draw))
    }
}

impl<S: SequenceModel> Model for PacoModel<S> {
    type Candidate = S::Candidate;

    fn initialize(&mut self) {
        self.edges.clear();
        self.size = 0;
        self.cursor = 0;
        trace_debug!(
            length = self.config.length,
            population_size = self.config.population_size,
            "paco model initialized"
        );
    }

    /// Admits each selected candidate's permutation, evicting the oldest
    /// resident one when the population is full.
    ///
    /// # Panics
    ///
    /// Panics if a permutation does not have `L` elements.
    fn update<'a, I>(&mut self, selected: I)
    where
        I: IntoIterator<Item = &'a Self::Candidate>,
        Self::Candidate: 'a,
    {
        for candidate in selected {
            let permutation = self.sequence.permutation(candidate);
            assert_eq!(
                permutation.len(),
                self.config.length,
                "selected permutation has the wrong length"
            );
            debug_assert!(crate::sequence::is_permutation(permutation));
            self.admit(permutation);
        }
        trace_debug!(resident = self.size, "paco population updated");
    }

    /// Constructs a complete permutation into `dest`.
    ///
    /// # Panics
    ///
    /// Panics if `dest` does not hold `L` elements or the cost hook returns
    /// a non-positive value.
    fn sample(&mut self, dest: &mut Self::Candidate, rng: &mut fastrand::Rng) {
        let length = self.config.length;
        assert_eq!(
            self.sequence.permutation(dest).len(),
            length,
            "destination permutation has the wrong length"
        );

        self.sequence.start(dest);
        self.pool.fill();
        self.pool.randomize(rng);

        let mut last = None;
        for position in 0..length {
            let chosen = self.choose_next(last, dest, rng);
            self.sequence.permutation_mut(dest)[position] = chosen;
            self.pool.delete(chosen);
            self.sequence.append(chosen, dest);
            last = Some(chosen);
        }
    }

    fn minimum_samples_needed_for_update(&self) -> usize {
        MINIMUM_SAMPLES_FOR_UPDATE
    }

    fn new_candidate(&self) -> Self::Candidate {
        self.sequence.new_candidate(self.config.length)
    }
}

impl<S: SequenceModel> fmt::Display for PacoModel<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.config, f)
    }
}

impl<S: SequenceModel> fmt::Debug for PacoModel<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PacoModel")
            .field("config", &self.config)
            .field("resident", &self.size)
            .field("cursor", &self.cursor)
            .finish_non_exhaustive()
    }
}

/// Adds `value` to a running sum, always returning a value strictly above `sum`.
///
/// Rounding can otherwise leave consecutive partial sums equal, which would
/// make an element unreachable by the roulette draw.
fn increasing_sum(sum: f64, value: f64) -> f64 {
    (sum + value).next_up()
}

/// Turns desirabilities into a strictly increasing cumulative table in place
/// and returns their total.
///
/// The last slot is set to infinity so every draw in `[0, total]` lands on
/// some slot.
fn accumulate(table: &mut [f64]) -> f64 {
    let mut sum = 0.0;
    for slot in table.iter_mut() {
        sum = increasing_sum(sum, *slot);
        *slot = sum;
    }
    if let Some(last) = table.last_mut() {
        *last = f64::INFINITY;
    }
    sum
}

/// Index of the first cumulative value at or above `draw`.
fn roulette_slot(cumulative: &[f64], draw: f64) -> usize {
    debug_assert!(
        cumulative.last().is_some_and(|c| c.is_infinite()),
        "cumulative table must end at infinity"
    );
    cumulative.partition_point(|&c| c < draw)
}
