//! Job-shop scheduling on top of the permutation model.
//!
//! A schedule for `jobs` jobs on `machines` machines is encoded as a
//! permutation of `jobs * machines` operation slots, slot `v` belonging to
//! job `v / machines`. Reading the permutation left to right, the k-th slot
//! of a job schedules its k-th operation.

mod ant;
mod instance;

pub use ant::{JsspAnt, JsspSequence};
pub use instance::JsspInstance;
