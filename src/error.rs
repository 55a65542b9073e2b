/// Errors returned when configuring models, drivers and problem instances.
///
/// Every variant describes an invalid configuration detected eagerly at
/// build time. Misuse of an already built model (for example a cost hook
/// returning a non-positive value) is a programming error and panics
/// instead.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Returned when the sequence length is outside `[2, 1_000_000]`.
    #[error("invalid length: {0} must be in [2, 1000000]")]
    InvalidLength(usize),

    /// Returned when the population capacity is zero or does not fit the
    /// edge counter type.
    #[error("invalid population size: {0} must be in [1, {max}]", max = u32::MAX)]
    InvalidPopulationSize(usize),

    /// Returned when the greedy-choice probability is not a finite value in `[0, 1]`.
    #[error("invalid q0: {0} must be in [0.0, 1.0]")]
    InvalidGreedyProbability(f64),

    /// Returned when the heuristic exponent is negative or not finite.
    #[error("invalid beta: {0} must be finite and non-negative")]
    InvalidBeta(f64),

    /// Returned when the maximum pheromone is not finite or below the minimum.
    #[error("invalid tau max: {tau_max} must be finite and at least tau0 ({tau0})")]
    InvalidTauMax {
        /// The requested maximum pheromone.
        tau_max: f64,
        /// The minimum pheromone implied by the sequence length.
        tau0: f64,
    },

    /// Returned when the derived pheromone quantities are not usable numbers.
    #[error("degenerate pheromone: tau0 = {tau0}, multiplier = {multiplier}")]
    DegeneratePheromone {
        /// The derived minimum pheromone.
        tau0: f64,
        /// The derived per-count pheromone increment.
        multiplier: f64,
    },

    /// Returned when the EDA selection sizes are inconsistent.
    #[error("invalid selection: mu ({mu}) must be in [{minimum}, lambda ({lambda})]")]
    InvalidSelection {
        /// Number of candidates passed to the model per generation.
        mu: usize,
        /// Number of candidates sampled per generation.
        lambda: usize,
        /// Smallest `mu` accepted.
        minimum: usize,
    },

    /// Returned when a driver has no termination criterion.
    #[error("no budget: at least one of max_generations or max_evaluations must be set")]
    InvalidBudget,

    /// Returned when a job-shop instance is malformed.
    #[error("invalid instance: {0}")]
    InvalidInstance(String),
}

pub type Result<T> = core::result::Result<T, Error>;
