//! Edge frequency counts over the permutations resident in a population.
//!
//! An edge is an ordered pair `(predecessor, successor)`. The predecessor of
//! the first element of a permutation is the virtual start node, written as
//! `None` throughout this crate. Adding a permutation of length `L`
//! increments exactly `L` edges; removing it decrements the same ones.

use std::collections::HashMap;

/// Largest `(L + 1) * L` matrix stored densely.
const DENSE_LIMIT: usize = 1 << 24;

#[derive(Clone, Debug)]
enum Counts {
    /// Row 0 is the start node, row `p + 1` is predecessor `p`.
    Dense(Vec<u32>),
    /// Only non-zero cells, keyed by `row * L + successor`.
    Sparse(HashMap<u64, u32>),
}

/// A multiset of directed edges, including edges leaving the start node.
///
/// # Examples
///
/// ```
/// use paco::edges::EdgeTable;
///
/// let mut table = EdgeTable::new(3);
/// table.add_permutation(&[2, 0, 1]);
///
/// assert_eq!(table.count(None, 2), 1);
/// assert_eq!(table.count(Some(2), 0), 1);
/// assert_eq!(table.count(Some(0), 1), 1);
/// assert_eq!(table.count(Some(1), 2), 0);
/// ```
#[derive(Clone, Debug)]
pub struct EdgeTable {
    length: usize,
    counts: Counts,
}

impl EdgeTable {
    /// Creates an empty table for permutations of `length` elements.
    #[must_use]
    pub fn new(length: usize) -> Self {
        let cells = length.saturating_add(1).saturating_mul(length);
        let counts = if cells <= DENSE_LIMIT {
            Counts::Dense(vec![0; cells])
        } else {
            Counts::Sparse(HashMap::new())
        };
        Self { length, counts }
    }

    /// Number of elements per permutation.
    #[must_use]
    pub fn length(&self) -> usize {
        self.length
    }

    /// Resets every count to zero, keeping the allocated storage.
    pub fn clear(&mut self) {
        match &mut self.counts {
            Counts::Dense(cells) => cells.fill(0),
            Counts::Sparse(cells) => cells.clear(),
        }
    }

    /// Increments the count of every edge of `permutation`.
    ///
    /// # Panics
    ///
    /// Panics if `permutation` does not have [`length`](Self::length) elements.
    pub fn add_permutation(&mut self, permutation: &[usize]) {
        assert_eq!(
            permutation.len(),
            self.length,
            "permutation length must match the edge table"
        );
        let mut predecessor = None;
        for &successor in permutation {
            self.increment(predecessor, successor);
            predecessor = Some(successor);
        }
    }

    /// Decrements the count of every edge of `permutation`.
    ///
    /// The permutation must have been added before and not removed since.
    ///
    /// # Panics
    ///
    /// Panics if the length does not match or an edge count would drop below zero.
    pub fn remove_permutation(&mut self, permutation: &[usize]) {
        assert_eq!(
            permutation.len(),
            self.length,
            "permutation length must match the edge table"
        );
        let mut predecessor = None;
        for &successor in permutation {
            self.decrement(predecessor, successor);
            predecessor = Some(successor);
        }
    }

    /// Returns how many resident permutations contain the edge.
    ///
    /// `None` as predecessor denotes the virtual start node.
    #[must_use]
    pub fn count(&self, predecessor: Option<usize>, successor: usize) -> u32 {
        let cell = self.cell(predecessor, successor);
        match &self.counts {
            Counts::Dense(cells) => cells[cell],
            Counts::Sparse(cells) => cells.get(&(cell as u64)).copied().unwrap_or(0),
        }
    }

    /// Sum of all counts leaving `predecessor`.
    #[must_use]
    pub fn out_degree(&self, predecessor: Option<usize>) -> u64 {
        (0..self.length)
            .map(|successor| u64::from(self.count(predecessor, successor)))
            .sum()
    }

    /// Returns `true` if every count is zero.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match &self.counts {
            Counts::Dense(cells) => cells.iter().all(|&c| c == 0),
            Counts::Sparse(cells) => cells.is_empty(),
        }
    }

    fn cell(&self, predecessor: Option<usize>, successor: usize) -> usize {
        assert!(successor < self.length, "successor {successor} out of range");
        let row = match predecessor {
            None => 0,
            Some(p) => {
                assert!(p < self.length, "predecessor {p} out of range");
                p + 1
            }
        };
        row * self.length + successor
    }

    fn increment(&mut self, predecessor: Option<usize>, successor: usize) {
        let cell = self.cell(predecessor, successor);
        match &mut self.counts {
            Counts::Dense(cells) => cells[cell] += 1,
            Counts::Sparse(cells) => *cells.entry(cell as u64).or_insert(0) += 1,
        }
    }

    fn decrement(&mut self, predecessor: Option<usize>, successor: usize) {
        let cell = self.cell(predecessor, successor);
        match &mut self.counts {
            Counts::Dense(cells) => {
                assert!(cells[cell] > 0, "edge count underflow at cell {cell}");
                cells[cell] -= 1;
            }
            Counts::Sparse(cells) => {
                let count = cells
                    .get_mut(&(cell as u64))
                    .filter(|c| **c > 0)
                    .unwrap_or_else(|| panic!("edge count underflow at cell {cell}"));
                *count -= 1;
                if *count == 0 {
                    cells.remove(&(cell as u64));
                }
            }
        }
    }
}
