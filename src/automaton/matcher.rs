//! Frozen, read-only topic matcher.

use std::collections::BTreeSet;

use log::trace;

use super::arena::StateArena;
use super::nfa::{traverse, MatchBuffers};
use crate::config::MatcherConfig;
use crate::emit::{CharOffsets, Emit, Span, Token};
use crate::interval_tree::remove_overlaps;

/// An immutable topic trie, produced by [`TrieBuilder`](super::TrieBuilder).
///
/// `TopicMatcher` is `Send + Sync`; any number of threads can match against
/// the same instance. Cloning copies the whole trie.
#[derive(Clone, Debug)]
pub struct TopicMatcher {
    arena: StateArena,
    config: MatcherConfig,
    pattern_count: usize,
}

impl Default for TopicMatcher {
    fn default() -> Self {
        Self::new(StateArena::new(), MatcherConfig::default(), 0)
    }
}

impl TopicMatcher {
    pub(crate) fn new(arena: StateArena, config: MatcherConfig, pattern_count: usize) -> Self {
        Self {
            arena,
            config,
            pattern_count,
        }
    }

    #[inline]
    pub fn config(&self) -> MatcherConfig {
        self.config
    }

    #[inline]
    pub fn pattern_count(&self) -> usize {
        self.pattern_count
    }

    #[inline]
    pub fn state_count(&self) -> usize {
        self.arena.len()
    }

    /// Scratch buffers sized for this trie, for use with
    /// [`TopicMatcher::parse_text_with`].
    pub fn buffers(&self) -> MatchBuffers {
        MatchBuffers::with_capacity(self.arena.len())
    }

    /// Every pattern matching the whole of `text`.
    ///
    /// Each emit ends at the last char of `text` and is as long as its
    /// pattern text. For wildcard patterns that is not the length of the
    /// topic they matched.
    pub fn parse_text(&self, text: &str) -> BTreeSet<Emit> {
        let mut bufs = self.buffers();
        self.parse_text_with(text, &mut bufs)
    }

    /// Like [`TopicMatcher::parse_text`], reusing caller-owned buffers.
    pub fn parse_text_with(&self, text: &str, bufs: &mut MatchBuffers) -> BTreeSet<Emit> {
        traverse(&self.arena, self.config, text, bufs);

        let mut emits = BTreeSet::new();
        if bufs.accepted().is_empty() {
            return emits;
        }

        let end = text.chars().count() - 1;
        for &id in bufs.accepted() {
            for (pattern, index) in self.arena[id].emits() {
                let len = pattern.chars().count();
                let start = (end + 1).saturating_sub(len);
                trace!("match {:?} #{} at {}..={}", pattern, index, start, end);
                emits.insert(Emit::new(start, end, &**pattern, *index));
            }
        }
        emits
    }

    /// True when at least one pattern matches `text`.
    pub fn is_match(&self, text: &str) -> bool {
        let mut bufs = self.buffers();
        traverse(&self.arena, self.config, text, &mut bufs);
        bufs.accepted()
            .iter()
            .any(|&id| !self.arena[id].emits().is_empty())
    }

    /// Matches with overlapping spans pruned, longest first, ordered by start.
    pub fn parse_text_without_overlaps(&self, text: &str) -> Vec<Emit> {
        remove_overlaps(self.parse_text(text).into_iter().collect())
    }

    /// Split `text` into alternating fragments and matches.
    ///
    /// Emits are laid out by start position. An emit starting inside a span
    /// already covered by an earlier match is skipped, so the tokens never
    /// overlap and always concatenate back to `text`.
    pub fn tokenize<'t>(&self, text: &'t str) -> Vec<Token<'t>> {
        let emits = self.parse_text(text);
        let offsets = CharOffsets::new(text);
        let mut tokens = Vec::with_capacity(emits.len() * 2 + 1);
        let mut next = 0usize;

        for emit in emits {
            if emit.start() < next {
                continue;
            }
            if emit.start() > next {
                tokens.push(Token::Fragment(offsets.slice(text, next, emit.start())));
            }
            let fragment = offsets.slice(text, emit.start(), emit.end() + 1);
            next = emit.end() + 1;
            tokens.push(Token::Match { fragment, emit });
        }

        if next < offsets.char_len() {
            tokens.push(Token::Fragment(offsets.slice(text, next, offsets.char_len())));
        }
        tokens
    }
}
