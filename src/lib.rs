//! topicmatch: Aho-Corasick style matching of dot-separated topics against
//! wildcard subscriptions.
//!
//! Patterns are topic filters such as `sensors.+.temp` or `alerts.#`:
//!
//! - `.` separates levels
//! - `+` matches exactly one level
//! - `#` matches the rest of a level and any number of following levels
//!
//! A pattern matches a topic only when it covers the whole topic.
//!
//! ```
//! use topicmatch::{Span, TrieBuilder};
//!
//! let mut builder = TrieBuilder::new();
//! builder.insert_all(["hi.+.how.are.you", "im.#"]);
//! let matcher = builder.build();
//!
//! assert!(matcher.is_match("hi.alex.how.are.you"));
//! assert!(!matcher.is_match("hi.james.bond.how.are.you"));
//!
//! let emits = matcher.parse_text("im.james.bond");
//! let emit = emits.iter().next().unwrap();
//! assert_eq!(emit.pattern(), "im.#");
//! assert_eq!(emit.end(), 12);
//! ```
//!
//! Building and matching are separate phases: [`TrieBuilder`] takes inserts,
//! [`TopicMatcher`] is the frozen, shareable result. Use
//! [`SharedTopicMatcher`] when patterns keep arriving while other threads
//! match.

pub mod automaton;
mod config;
mod emit;
pub mod interval_tree;

use std::fmt;

pub use automaton::{MatchBuffers, SharedTopicMatcher, TopicMatcher, TrieBuilder};
pub use config::MatcherConfig;
pub use emit::{Emit, Interval, Span, Token};
pub use interval_tree::{remove_overlaps, IntervalTree};

/// Errors raised when handing span data across the API boundary.
///
/// Matching itself cannot fail: empty patterns are ignored and empty texts
/// simply match nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopicMatchError {
    /// An interval whose start lies after its end
    InvalidInterval { start: usize, end: usize },
    /// A span reaching past the end of the text it was applied to
    SpanOutOfBounds { start: usize, end: usize, len: usize },
}

impl fmt::Display for TopicMatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TopicMatchError::InvalidInterval { start, end } => {
                write!(f, "invalid interval: start {} is after end {}", start, end)
            }
            TopicMatchError::SpanOutOfBounds { start, end, len } => write!(
                f,
                "span {}..={} out of bounds for text of {} chars",
                start, end, len
            ),
        }
    }
}

impl std::error::Error for TopicMatchError {}
