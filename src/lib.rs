#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![deny(unreachable_pub)]
#![deny(clippy::correctness)]
#![deny(clippy::suspicious)]
#![deny(clippy::style)]
#![deny(clippy::complexity)]
#![deny(clippy::perf)]
#![deny(clippy::pedantic)]
#![deny(clippy::std_instead_of_core)]

//! Population-based ant colony optimization (PACO) for permutation problems.
//!
//! The centerpiece is [`PacoModel`](model::paco::PacoModel), a sample-able
//! probability model over permutations. It keeps a small, age-ordered
//! population of good permutations, derives edge pheromones from how often
//! the resident permutations use each edge, and builds new permutations one
//! element at a time from those pheromones and a problem-specific cost.
//!
//! # Getting Started
//!
//! ```
//! use paco::prelude::*;
//!
//! // Sample tours over 8 cities, preferring ones close to the identity.
//! let mut model = PacoModel::builder(8).population_size(4).build().unwrap();
//! let eda = Eda::builder().mu(2).lambda(10).max_generations(30).build().unwrap();
//!
//! let displacement = |tour: &Vec<usize>| -> f64 {
//!     tour.iter().enumerate().map(|(i, &c)| i.abs_diff(c) as f64).sum()
//! };
//!
//! let mut rng = fastrand::Rng::with_seed(7);
//! let result = eda.run(&mut model, displacement, &mut rng).unwrap();
//! assert!(is_permutation(&result.best));
//! ```
//!
//! # Core Concepts
//!
//! | Type | Role |
//! |------|------|
//! | [`Model`](model::Model) | Lifecycle contract: `initialize`, `update`, `sample`. |
//! | [`PacoModel`](model::paco::PacoModel) | Ring-buffer population, edge pheromones, stochastic construction. |
//! | [`SequenceModel`](sequence::SequenceModel) | Hooks mapping a candidate to its permutation and scoring appends. |
//! | [`EdgeTable`](edges::EdgeTable) | Edge counts of the resident permutations. |
//! | [`NodePool`](pool::NodePool) | Elements still to be placed during construction. |
//! | [`Eda`](eda::Eda) | Generic (mu, lambda) driver for any model. |
//! | [`JsspSequence`](jssp::JsspSequence) | Job-shop scheduling encoding with a finish-time heuristic. |
//!
//! # Feature Flags
//!
//! | Flag | What it enables | Default |
//! |------|----------------|---------|
//! | `serde` | `Serialize`/`Deserialize` on [`PacoConfig`](model::paco::PacoConfig) and [`JsspInstance`](jssp::JsspInstance) | off |
//! | `tracing` | Structured log events via [`tracing`](https://docs.rs/tracing) on model updates and driver progress | off |

/// Emit a `tracing::info!` event when the `tracing` feature is enabled.
/// No-op otherwise.
#[cfg(feature = "tracing")]
macro_rules! trace_info {
    ($($arg:tt)*) => { tracing::info!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_info {
    ($($arg:tt)*) => {};
}

/// Emit a `tracing::debug!` event when the `tracing` feature is enabled.
/// No-op otherwise.
#[cfg(feature = "tracing")]
macro_rules! trace_debug {
    ($($arg:tt)*) => { tracing::debug!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_debug {
    ($($arg:tt)*) => {};
}

pub mod eda;
pub mod edges;
mod error;
pub mod jssp;
pub mod model;
pub mod pool;
pub mod sequence;

pub use error::{Error, Result};

/// Convenient wildcard import for the most common types.
///
/// ```
/// use paco::prelude::*;
/// ```
pub mod prelude {
    pub use crate::eda::{Eda, EdaBuilder, EdaResult};
    pub use crate::edges::EdgeTable;
    pub use crate::error::{Error, Result};
    pub use crate::jssp::{JsspAnt, JsspInstance, JsspSequence};
    pub use crate::model::Model;
    pub use crate::model::paco::{PacoConfig, PacoModel, PacoModelBuilder};
    pub use crate::pool::NodePool;
    pub use crate::sequence::{PermutationSequence, SequenceModel, is_permutation};
}
