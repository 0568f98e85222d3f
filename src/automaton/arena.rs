//! Arena-based state graph for the topic trie.
//!
//! Every state lives in one `Vec` and is addressed by a `StateId`. Parent to
//! child edges, wildcard self-loops and fallback links are all plain indices,
//! so cycles need no special ownership handling:
//!
//! ```text
//!   root --i--> s1 --m--> s2 --.--> s3 --#--> s4 ⟲ #
//!                                              |
//!                                              .--> s5 --b--> ...
//!                                                   |
//!                                  fallback: s5 ····> s4
//! ```
//!
//! The arena only ever grows. Dropping it frees all states at once.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

/// A state identifier - just an index into the arena.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub struct StateId(u32);

impl StateId {
    /// The root state. Always present, depth 0.
    pub const ROOT: StateId = StateId(0);

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// One pattern ending at a state: the inserted text and its insertion index.
pub type PatternEmit = (Arc<str>, usize);

/// A trie position.
#[derive(Clone, Debug)]
pub struct State {
    depth: u32,
    /// Symbol on the edge that led here (`'\0'` for root)
    symbol: char,
    children: FxHashMap<char, StateId>,
    fallback: Option<StateId>,
    /// Set once a child other than a self-loop exists
    has_outgoing: bool,
    pattern_end: bool,
    emits: SmallVec<[PatternEmit; 1]>,
}

impl State {
    fn new(depth: u32, symbol: char) -> Self {
        Self {
            depth,
            symbol,
            children: FxHashMap::default(),
            fallback: None,
            has_outgoing: false,
            pattern_end: false,
            emits: SmallVec::new(),
        }
    }

    #[inline]
    pub fn depth(&self) -> u32 {
        self.depth
    }

    #[inline]
    pub fn symbol(&self) -> char {
        self.symbol
    }

    /// Exact transition lookup. Does not follow the fallback link.
    #[inline]
    pub fn child_for(&self, symbol: char) -> Option<StateId> {
        self.children.get(&symbol).copied()
    }

    /// Symbols with a transition out of this state, self-loops included.
    pub fn transitions(&self) -> impl Iterator<Item = (char, StateId)> + '_ {
        self.children.iter().map(|(&symbol, &id)| (symbol, id))
    }

    #[inline]
    pub fn has_outgoing_transitions(&self) -> bool {
        self.has_outgoing
    }

    #[inline]
    pub fn mark_pattern_end(&mut self) {
        self.pattern_end = true;
    }

    #[inline]
    pub fn is_pattern_end(&self) -> bool {
        self.pattern_end
    }

    pub fn add_emit(&mut self, pattern: Arc<str>, index: usize) {
        if !self.emits.iter().any(|(_, i)| *i == index) {
            self.emits.push((pattern, index));
        }
    }

    #[inline]
    pub fn emits(&self) -> &[PatternEmit] {
        &self.emits
    }

    #[inline]
    pub fn fallback(&self) -> Option<StateId> {
        self.fallback
    }

    #[inline]
    pub fn set_fallback(&mut self, target: StateId) {
        self.fallback = Some(target);
    }

    /// True when reaching this state at the end of the text is a match.
    ///
    /// Wildcard states always have outgoing transitions (their self-loop
    /// at least), so the end marker is what makes them accepting.
    #[inline]
    pub fn accepts(&self) -> bool {
        !self.has_outgoing || self.pattern_end
    }
}

/// Owner of every state in one trie.
#[derive(Clone, Debug)]
pub struct StateArena {
    states: Vec<State>,
}

impl Default for StateArena {
    fn default() -> Self {
        Self::new()
    }
}

impl StateArena {
    /// A new arena holding only the root state.
    pub fn new() -> Self {
        Self {
            states: vec![State::new(0, '\0')],
        }
    }

    fn alloc(&mut self, depth: u32, symbol: char) -> StateId {
        let id = StateId(self.states.len() as u32);
        self.states.push(State::new(depth, symbol));
        id
    }

    /// Get a reference to a state by ID.
    #[inline]
    pub fn get(&self, id: StateId) -> Option<&State> {
        self.states.get(id.index())
    }

    /// Advance from `from` on `symbol`, creating the child if needed.
    ///
    /// Returns the existing child when one is already there, which may be
    /// `from` itself if a self-loop was installed on `symbol`.
    pub fn add_child(&mut self, from: StateId, symbol: char) -> StateId {
        if let Some(next) = self[from].child_for(symbol) {
            return next;
        }
        let depth = self[from].depth + 1;
        let next = self.alloc(depth, symbol);
        let state = &mut self[from];
        state.children.insert(symbol, next);
        state.has_outgoing = true;
        next
    }

    /// Install `from --symbol--> to` unless `from` already has a transition
    /// on `symbol`. Returns `to`.
    ///
    /// Only used for wildcard self-loops, where `to == from`. A self-loop does
    /// not count as an outgoing transition.
    pub fn add_transition(&mut self, from: StateId, symbol: char, to: StateId) -> StateId {
        let state = &mut self[from];
        if state.child_for(symbol).is_none() {
            state.children.insert(symbol, to);
            if to != from {
                state.has_outgoing = true;
            }
        }
        to
    }

    /// Exact transition on `symbol`, falling back along failure links until
    /// some state has one. `None` if the chain runs out first.
    #[inline]
    pub fn transition_with_fallback(&self, from: StateId, symbol: char) -> Option<StateId> {
        let mut current = &self[from];
        loop {
            if let Some(next) = current.child_for(symbol) {
                return Some(next);
            }
            current = &self[current.fallback?];
        }
    }

    /// Number of states in the arena, root included.
    #[inline]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// True when only the root exists.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.states.len() == 1
    }

    pub fn iter(&self) -> impl Iterator<Item = (StateId, &State)> + '_ {
        self.states
            .iter()
            .enumerate()
            .map(|(i, state)| (StateId(i as u32), state))
    }
}

impl std::ops::Index<StateId> for StateArena {
    type Output = State;

    #[inline]
    fn index(&self, id: StateId) -> &Self::Output {
        &self.states[id.index()]
    }
}

impl std::ops::IndexMut<StateId> for StateArena {
    #[inline]
    fn index_mut(&mut self, id: StateId) -> &mut Self::Output {
        &mut self.states[id.index()]
    }
}
