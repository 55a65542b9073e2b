//! Extension points connecting the construction algorithm to a candidate encoding.
//!
//! A [`PacoModel`](crate::model::paco::PacoModel) only knows how to build
//! permutations. The [`SequenceModel`] it is generic over tells it where the
//! permutation lives inside a candidate, how expensive it is to append a
//! value to a partially built candidate, and what bookkeeping to do after a
//! value was placed. The hooks are resolved statically, so the construction
//! loop is monomorphized for each encoding.

/// Strategy describing a candidate representation backed by a permutation.
///
/// # Examples
///
/// A candidate that remembers how many values were placed and prefers
/// small values first:
///
/// ```
/// use paco::sequence::SequenceModel;
///
/// struct Tour {
///     order: Vec<usize>,
///     placed: usize,
/// }
///
/// struct SmallFirst;
///
/// impl SequenceModel for SmallFirst {
///     type Candidate = Tour;
///
///     fn new_candidate(&self, length: usize) -> Tour {
///         Tour { order: vec![0; length], placed: 0 }
///     }
///
///     fn permutation<'a>(&self, candidate: &'a Tour) -> &'a [usize] {
///         &candidate.order
///     }
///
///     fn permutation_mut<'a>(&self, candidate: &'a mut Tour) -> &'a mut [usize] {
///         &mut candidate.order
///     }
///
///     fn cost_of_appending(&self, value: usize, _candidate: &Tour) -> f64 {
///         1.0 + value as f64
///     }
///
///     fn start(&self, candidate: &mut Tour) {
///         candidate.placed = 0;
///     }
///
///     fn append(&self, _value: usize, candidate: &mut Tour) {
///         candidate.placed += 1;
///     }
/// }
/// ```
pub trait SequenceModel {
    /// The candidate type sampled into and absorbed from.
    type Candidate;

    /// Creates a candidate able to hold a permutation of `length` elements.
    fn new_candidate(&self, length: usize) -> Self::Candidate;

    /// The permutation backing `candidate`.
    fn permutation<'a>(&self, candidate: &'a Self::Candidate) -> &'a [usize];

    /// Mutable access to the permutation backing `candidate`.
    fn permutation_mut<'a>(&self, candidate: &'a mut Self::Candidate) -> &'a mut [usize];

    /// Cost of appending `value` to the partially built `candidate`.
    ///
    /// Must be strictly positive. The default is a uniform cost of 1, so
    /// the pheromone alone drives selection.
    fn cost_of_appending(&self, _value: usize, _candidate: &Self::Candidate) -> f64 {
        1.0
    }

    /// Called once before the first value of a new permutation is placed.
    fn start(&self, _candidate: &mut Self::Candidate) {}

    /// Called after `value` was written to the next position of `candidate`.
    fn append(&self, _value: usize, _candidate: &mut Self::Candidate) {}
}

/// The plain encoding: the candidate is the permutation itself.
#[derive(Clone, Copy, Debug, Default)]
pub struct PermutationSequence;

impl SequenceModel for PermutationSequence {
    type Candidate = Vec<usize>;

    fn new_candidate(&self, length: usize) -> Vec<usize> {
        vec![0; length]
    }

    fn permutation<'a>(&self, candidate: &'a Vec<usize>) -> &'a [usize] {
        candidate
    }

    fn permutation_mut<'a>(&self, candidate: &'a mut Vec<usize>) -> &'a mut [usize] {
        candidate
    }
}

/// Returns `true` if `values` contains each of `0..values.len()` exactly once.
///
/// # Examples
///
/// ```
/// use paco::sequence::is_permutation;
///
/// assert!(is_permutation(&[2, 0, 1]));
/// assert!(!is_permutation(&[0, 0, 1]));
/// assert!(!is_permutation(&[0, 3, 1]));
/// ```
#[must_use]
pub fn is_permutation(values: &[usize]) -> bool {
    let mut seen = vec![false; values.len()];
    for &v in values {
        match seen.get_mut(v) {
            Some(slot) if !*slot => *slot = true,
            _ => return false,
        }
    }
    true
}
