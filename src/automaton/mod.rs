//! Topic trie: an Aho-Corasick style automaton with topic wildcards.
//!
//! The key components are:
//!
//! - `StateArena`: all trie states, addressed by `StateId`
//! - `TrieBuilder`: pattern insertion and wildcard wiring
//! - `TopicMatcher`: the frozen trie, matched by NFA simulation
//! - `SharedTopicMatcher`: thread-safe wrapper allowing inserts during matching
//!
//! # Module Organization
//!
//! - `arena`: state graph (states, transitions, fallback links, emits)
//! - `active_set`: sparse sets holding the active states per position
//! - `builder`: `TrieBuilder`
//! - `nfa`: the traversal loop and its reusable buffers
//! - `matcher`: `TopicMatcher` (parse, tokenize, overlap pruning)
//! - `thread_safe`: `SharedTopicMatcher`

mod active_set;
mod arena;
mod builder;
mod matcher;
mod nfa;
mod thread_safe;

pub use arena::{PatternEmit, State, StateArena, StateId};
pub use builder::{TrieBuilder, LEVEL_SEPARATOR, MULTI_LEVEL_WILDCARD, SINGLE_LEVEL_WILDCARD};
pub use matcher::TopicMatcher;
pub use nfa::{traverse, MatchBuffers};
pub use thread_safe::SharedTopicMatcher;

#[cfg(test)]
mod tests;
