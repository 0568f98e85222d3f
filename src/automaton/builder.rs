//! Pattern insertion and wildcard wiring.
//!
//! Patterns are walked symbol by symbol, one trie state per symbol. Three
//! symbols get extra wiring:
//!
//! - `+` gets a self-loop on `+`: the state keeps absorbing the current level.
//! - `#` gets a self-loop on `#` and becomes the "last `#`" of this pattern.
//! - `.` after a `#` gets a fallback link to that `#`, so a level that fails to
//!   continue the pattern resumes as "still inside the `#`".
//!
//! Only the most recent `#` of a pattern is remembered. A pattern with two
//! `#` segments wires every later `.` back to the second one, and patterns
//! sharing a `.` state overwrite each other's fallback (last insert wins).

use std::sync::Arc;

use log::{debug, trace};

use super::arena::{StateArena, StateId};
use super::matcher::TopicMatcher;
use crate::config::MatcherConfig;

/// Separator between topic levels.
pub const LEVEL_SEPARATOR: char = '.';
/// Matches exactly one level.
pub const SINGLE_LEVEL_WILDCARD: char = '+';
/// Matches the rest of a level and any number of following levels.
pub const MULTI_LEVEL_WILDCARD: char = '#';

/// Mutable trie under construction.
///
/// Insert patterns, then call [`TrieBuilder::build`] to get a
/// [`TopicMatcher`]. Matching is only available on the built matcher, so a
/// trie can never be matched while insertions are pending.
///
/// ```
/// # use topicmatch::TrieBuilder;
/// let mut builder = TrieBuilder::new();
/// builder.insert("sensors.+.temp");
/// builder.insert("alerts.#");
/// let matcher = builder.build();
///
/// assert!(matcher.is_match("sensors.kitchen.temp"));
/// assert!(matcher.is_match("alerts.disk.full"));
/// assert!(!matcher.is_match("sensors.temp"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct TrieBuilder {
    arena: StateArena,
    config: MatcherConfig,
    pattern_count: usize,
    /// Cleared by every insertion, set again by `build`
    fallbacks_current: bool,
}

impl TrieBuilder {
    pub fn new() -> Self {
        Self::with_config(MatcherConfig::default())
    }

    pub fn with_config(config: MatcherConfig) -> Self {
        Self {
            arena: StateArena::new(),
            config,
            pattern_count: 0,
            fallbacks_current: true,
        }
    }

    /// Shorthand for a case-insensitive builder.
    pub fn case_insensitive() -> Self {
        Self::with_config(MatcherConfig::new().case_insensitive())
    }

    #[inline]
    pub fn config(&self) -> MatcherConfig {
        self.config
    }

    /// Add one pattern. Empty patterns are ignored.
    ///
    /// Inserting the same text twice records two emits with different
    /// indices, and matching reports both.
    pub fn insert(&mut self, pattern: &str) {
        if pattern.is_empty() {
            return;
        }

        let folded = self.config.fold_str(pattern);
        let mut current = StateId::ROOT;
        let mut last_multi_wildcard: Option<StateId> = None;

        for symbol in folded.chars() {
            current = self.arena.add_child(current, symbol);

            match symbol {
                LEVEL_SEPARATOR => {
                    if let Some(wildcard) = last_multi_wildcard {
                        self.arena[current].set_fallback(wildcard);
                    }
                }
                SINGLE_LEVEL_WILDCARD => {
                    self.arena.add_transition(current, symbol, current);
                }
                MULTI_LEVEL_WILDCARD => {
                    self.arena.add_transition(current, symbol, current);
                    last_multi_wildcard = Some(current);
                }
                _ => {}
            }
        }

        let index = self.pattern_count;
        self.pattern_count += 1;

        let terminal = &mut self.arena[current];
        terminal.mark_pattern_end();
        terminal.add_emit(Arc::from(pattern), index);
        self.fallbacks_current = false;

        trace!(
            "inserted pattern {:?} as #{} at depth {}",
            pattern,
            index,
            terminal.depth()
        );
    }

    /// Insert every pattern from `patterns`, in order.
    pub fn insert_all<I, S>(&mut self, patterns: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for pattern in patterns {
            self.insert(pattern.as_ref());
        }
    }

    /// Number of patterns inserted so far (duplicates included).
    #[inline]
    pub fn pattern_count(&self) -> usize {
        self.pattern_count
    }

    /// Number of trie states, root included.
    #[inline]
    pub fn state_count(&self) -> usize {
        self.arena.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pattern_count == 0
    }

    /// False when patterns were inserted since the last build.
    #[inline]
    pub fn is_built(&self) -> bool {
        self.fallbacks_current
    }

    #[inline]
    pub fn arena(&self) -> &StateArena {
        &self.arena
    }

    /// Freeze a copy of the current trie. The builder stays usable.
    pub fn build(&mut self) -> TopicMatcher {
        self.seal();
        TopicMatcher::new(self.arena.clone(), self.config, self.pattern_count)
    }

    /// Freeze the trie without copying it.
    pub fn into_matcher(mut self) -> TopicMatcher {
        self.seal();
        TopicMatcher::new(self.arena, self.config, self.pattern_count)
    }

    /// Check the fallback wiring and mark it current.
    ///
    /// Fallbacks are installed during insertion. Every link must point from
    /// a `.` state to a shallower `#` state, and `#` states never carry a
    /// fallback themselves, which keeps fallback chains one hop long.
    fn seal(&mut self) {
        if self.fallbacks_current {
            return;
        }

        let mut links = 0usize;
        for (id, state) in self.arena.iter() {
            if let Some(target) = state.fallback() {
                let target_state = &self.arena[target];
                debug_assert_eq!(state.symbol(), LEVEL_SEPARATOR, "fallback on {:?}", id);
                debug_assert_eq!(target_state.symbol(), MULTI_LEVEL_WILDCARD);
                debug_assert!(target_state.depth() < state.depth());
                debug_assert!(target_state.fallback().is_none());
                links += 1;
            }
        }

        self.fallbacks_current = true;
        debug!(
            "built topic trie: {} patterns, {} states, {} fallback links",
            self.pattern_count,
            self.arena.len(),
            links
        );
    }
}
