//! Model trait and implementations.

pub mod paco;

/// A stateful probability model driven by an estimation-of-distribution loop.
///
/// The driver calls [`initialize`](Model::initialize) once per restart, then
/// alternates between [`sample`](Model::sample), to draw new candidates, and
/// [`update`](Model::update), to fold the selected ones back into the model.
/// Random numbers are always supplied by the caller, so the same generator
/// state and the same call sequence reproduce the same results.
///
/// A model instance is meant to be driven by one thread at a time.
pub trait Model {
    /// The candidate type the model samples into.
    type Candidate;

    /// Resets the model to its initial, uninformed state.
    fn initialize(&mut self);

    /// Absorbs the selected candidates, in priority order.
    fn update<'a, I>(&mut self, selected: I)
    where
        I: IntoIterator<Item = &'a Self::Candidate>,
        Self::Candidate: 'a;

    /// Overwrites `dest` with a new candidate drawn from the model.
    fn sample(&mut self, dest: &mut Self::Candidate, rng: &mut fastrand::Rng);

    /// Smallest number of selected candidates an update should receive.
    fn minimum_samples_needed_for_update(&self) -> usize;

    /// Allocates a candidate that [`sample`](Model::sample) can write into.
    fn new_candidate(&self) -> Self::Candidate;
}
