//! The set of elements not yet placed while a permutation is constructed.

/// An indexable set over `0..capacity` with constant-time removal by value.
///
/// Removal swaps the removed value with the last available one, so the
/// enumeration order of [`get`](Self::get) changes as elements are removed.
///
/// # Examples
///
/// ```
/// use paco::pool::NodePool;
///
/// let mut pool = NodePool::new(4);
/// pool.fill();
/// pool.delete(1);
///
/// assert_eq!(pool.len(), 3);
/// assert!(!pool.contains(1));
/// assert_eq!(pool.get(1), 3);
/// ```
#[derive(Clone, Debug)]
pub struct NodePool {
    nodes: Vec<usize>,
    /// `positions[v]` is the index of `v` in `nodes`.
    positions: Vec<usize>,
    size: usize,
}

impl NodePool {
    /// Creates an empty pool able to hold `0..capacity`.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            nodes: (0..capacity).collect(),
            positions: (0..capacity).collect(),
            size: 0,
        }
    }

    /// Makes every value in `0..capacity` available, in ascending order.
    pub fn fill(&mut self) {
        for (i, (node, position)) in self
            .nodes
            .iter_mut()
            .zip(self.positions.iter_mut())
            .enumerate()
        {
            *node = i;
            *position = i;
        }
        self.size = self.nodes.len();
    }

    /// Shuffles the available values uniformly at random (Fisher-Yates).
    pub fn randomize(&mut self, rng: &mut fastrand::Rng) {
        for i in (1..self.size).rev() {
            let j = rng.usize(0..=i);
            self.swap(i, j);
        }
    }

    /// Number of available values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns `true` if no value is available.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// The available value at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    #[must_use]
    pub fn get(&self, index: usize) -> usize {
        assert!(index < self.size, "pool index {index} out of range");
        self.nodes[index]
    }

    /// Returns `true` if `value` is currently available.
    #[must_use]
    pub fn contains(&self, value: usize) -> bool {
        self.positions
            .get(value)
            .is_some_and(|&position| position < self.size)
    }

    /// Removes `value` from the available set.
    ///
    /// # Panics
    ///
    /// Panics if `value` is not available.
    pub fn delete(&mut self, value: usize) {
        assert!(self.contains(value), "value {value} is not in the pool");
        let last = self.size - 1;
        self.swap(self.positions[value], last);
        self.size = last;
    }

    fn swap(&mut self, i: usize, j: usize) {
        self.nodes.swap(i, j);
        self.positions[self.nodes[i]] = i;
        self.positions[self.nodes[j]] = j;
    }
}
