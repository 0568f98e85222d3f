//! NFA simulation over the topic trie.
//!
//! Wildcards make the trie non-deterministic: after `a.` in `a.+.b` and
//! `a.x.c`, the symbol `x` both follows the literal edge and enters the `+`
//! level. Instead of backtracking, every state reachable at the current
//! position is kept in an active set and stepped together.
//!
//! For each active state `s` and symbol `c`:
//! 1. the exact edge on `c`, following fallback links when `s` has none;
//! 2. the `+` edge, unless `s` is itself a `+` state and `c` is the level
//!    separator (that separator closes the `+` level);
//! 3. the `#` edge.
//!
//! Whatever is active after the last symbol and accepting is a match.

use super::active_set::ActiveSets;
use super::arena::{StateArena, StateId};
use super::builder::{LEVEL_SEPARATOR, MULTI_LEVEL_WILDCARD, SINGLE_LEVEL_WILDCARD};
use crate::config::MatcherConfig;

/// Reusable scratch space for [`traverse`].
///
/// Matching allocates nothing once the buffers have grown to the size of the
/// trie.
#[derive(Clone, Debug)]
pub struct MatchBuffers {
    sets: ActiveSets,
    /// Accepting states reached at the final position
    accepted: Vec<StateId>,
}

impl Default for MatchBuffers {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchBuffers {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Pre-size the buffers for a trie of `state_capacity` states.
    pub fn with_capacity(state_capacity: usize) -> Self {
        Self {
            sets: ActiveSets::new(state_capacity),
            accepted: Vec::new(),
        }
    }

    /// Accepting states from the last traversal, in the order reached.
    #[inline]
    pub fn accepted(&self) -> &[StateId] {
        &self.accepted
    }
}

/// Run `text` through the trie. Results are left in `bufs.accepted()`.
///
/// The whole text must be consumed: a state only counts if it is active
/// after the final symbol. Empty text never matches.
pub fn traverse(arena: &StateArena, config: MatcherConfig, text: &str, bufs: &mut MatchBuffers) {
    bufs.accepted.clear();
    if text.is_empty() || arena.is_empty() {
        return;
    }

    let sets = &mut bufs.sets;
    sets.ensure_capacity(arena.len());
    sets.current.insert(StateId::ROOT);

    for symbol in text.chars().map(|c| config.fold(c)) {
        for id in sets.current.iter() {
            let state = &arena[id];

            if let Some(next) = arena.transition_with_fallback(id, symbol) {
                sets.next.insert(next);
            }

            if !(state.symbol() == SINGLE_LEVEL_WILDCARD && symbol == LEVEL_SEPARATOR) {
                if let Some(next) = state.child_for(SINGLE_LEVEL_WILDCARD) {
                    sets.next.insert(next);
                }
            }

            if let Some(next) = state.child_for(MULTI_LEVEL_WILDCARD) {
                sets.next.insert(next);
            }
        }

        sets.advance();
        if sets.current.is_empty() {
            return;
        }
    }

    bufs.accepted.extend(sets.current.iter().filter(|&id| arena[id].accepts()));
}
