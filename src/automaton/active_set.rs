//! Sparse sets of active states for the NFA simulation.
//!
//! Based on: https://research.swtch.com/sparse
//!
//! Each text position needs a fresh "reached" set, and the same state can be
//! reached along several paths (an exact edge and a wildcard edge, or two
//! states falling back to the same `#`). A sparse set gives O(1) insert with
//! duplicate rejection, O(1) clear, and keeps insertion order so traversal is
//! deterministic.

use super::arena::StateId;

/// A set of state IDs below a fixed capacity.
#[derive(Clone, Debug)]
pub struct ActiveSet {
    len: usize,
    /// IDs in insertion order
    dense: Vec<StateId>,
    /// ID -> position in dense. An ID is present iff
    /// sparse[id] < len && dense[sparse[id]] == id.
    sparse: Vec<usize>,
}

impl ActiveSet {
    /// Elements must have index in `[0, capacity)`.
    pub fn new(capacity: usize) -> Self {
        ActiveSet {
            len: 0,
            dense: vec![StateId::ROOT; capacity],
            sparse: vec![0; capacity],
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.dense.len()
    }

    /// Grow to at least `capacity`. Clears the set.
    pub fn ensure_capacity(&mut self, capacity: usize) {
        self.clear();
        if self.capacity() < capacity {
            self.dense.resize(capacity, StateId::ROOT);
            self.sparse.resize(capacity, 0);
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns true if the state was not already present.
    #[inline]
    pub fn insert(&mut self, id: StateId) -> bool {
        if self.contains(id) {
            return false;
        }
        debug_assert!(
            self.len < self.capacity(),
            "ActiveSet overflow: len={}, capacity={}",
            self.len,
            self.capacity()
        );
        self.dense[self.len] = id;
        self.sparse[id.index()] = self.len;
        self.len += 1;
        true
    }

    #[inline]
    pub fn contains(&self, id: StateId) -> bool {
        let pos = self.sparse[id.index()];
        pos < self.len && self.dense[pos] == id
    }

    #[inline]
    pub fn clear(&mut self) {
        self.len = 0;
    }

    #[inline]
    pub fn as_slice(&self) -> &[StateId] {
        &self.dense[..self.len]
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = StateId> + '_ {
        self.as_slice().iter().copied()
    }
}

/// The states active before and after the current symbol.
#[derive(Clone, Debug)]
pub struct ActiveSets {
    pub current: ActiveSet,
    pub next: ActiveSet,
}

impl ActiveSets {
    pub fn new(capacity: usize) -> Self {
        ActiveSets {
            current: ActiveSet::new(capacity),
            next: ActiveSet::new(capacity),
        }
    }

    /// Size both sets for an arena of `capacity` states and clear them.
    pub fn ensure_capacity(&mut self, capacity: usize) {
        self.current.ensure_capacity(capacity);
        self.next.ensure_capacity(capacity);
    }

    /// Make `next` the current set and empty the new `next`.
    #[inline]
    pub fn advance(&mut self) {
        std::mem::swap(&mut self.current, &mut self.next);
        self.next.clear();
    }
}
