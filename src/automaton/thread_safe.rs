//! Thread-safe topic matcher.
//!
//! Insertion and matching cannot interleave on one trie. `SharedTopicMatcher`
//! keeps them apart: writers take a lock on the builder, insert, and publish a
//! freshly frozen `TopicMatcher`; readers load whichever snapshot is current
//! without locking.

use std::collections::BTreeSet;
use std::sync::Arc;

use arc_swap::ArcSwap;
use log::debug;
use parking_lot::Mutex;

use super::builder::TrieBuilder;
use super::matcher::TopicMatcher;
use crate::config::MatcherConfig;
use crate::emit::{Emit, Token};

/// A topic matcher that can be shared across threads and updated while in
/// use.
///
/// Pattern insertion is serialized via a mutex, while matching is lock-free.
/// Every insert call copies the trie once, so batch inserts through
/// [`SharedTopicMatcher::insert_all`].
///
/// ```
/// # use topicmatch::SharedTopicMatcher;
/// use std::sync::Arc;
///
/// let shared = Arc::new(SharedTopicMatcher::new());
/// shared.insert("orders.#");
///
/// let reader = Arc::clone(&shared);
/// let handle = std::thread::spawn(move || reader.is_match("orders.eu.created"));
/// assert!(handle.join().unwrap());
/// ```
pub struct SharedTopicMatcher {
    /// The frozen trie - atomically swappable, lock-free reads
    current: ArcSwap<TopicMatcher>,
    /// Mutex protecting pattern building
    builder: Mutex<TrieBuilder>,
}

impl Default for SharedTopicMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl SharedTopicMatcher {
    pub fn new() -> Self {
        Self::with_config(MatcherConfig::default())
    }

    pub fn with_config(config: MatcherConfig) -> Self {
        Self::from_builder(TrieBuilder::with_config(config))
    }

    /// Start from patterns already in `builder`.
    pub fn from_builder(mut builder: TrieBuilder) -> Self {
        let matcher = builder.build();
        Self {
            current: ArcSwap::from_pointee(matcher),
            builder: Mutex::new(builder),
        }
    }

    /// Add one pattern and publish the updated trie.
    pub fn insert(&self, pattern: &str) {
        let mut builder = self.builder.lock();
        builder.insert(pattern);
        self.publish(&mut builder);
    }

    /// Add several patterns and publish once.
    pub fn insert_all<I, S>(&self, patterns: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = self.builder.lock();
        builder.insert_all(patterns);
        self.publish(&mut builder);
    }

    fn publish(&self, builder: &mut TrieBuilder) {
        if builder.is_built() {
            return;
        }
        let matcher = builder.build();
        debug!(
            "publishing topic trie snapshot with {} patterns",
            matcher.pattern_count()
        );
        self.current.store(Arc::new(matcher));
    }

    /// The trie as of the last completed insert.
    ///
    /// The snapshot is unaffected by later inserts.
    pub fn snapshot(&self) -> Arc<TopicMatcher> {
        self.current.load_full()
    }

    pub fn pattern_count(&self) -> usize {
        self.current.load().pattern_count()
    }

    pub fn parse_text(&self, text: &str) -> BTreeSet<Emit> {
        self.current.load().parse_text(text)
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.current.load().is_match(text)
    }

    pub fn parse_text_without_overlaps(&self, text: &str) -> Vec<Emit> {
        self.current.load().parse_text_without_overlaps(text)
    }

    pub fn tokenize<'t>(&self, text: &'t str) -> Vec<Token<'t>> {
        self.current.load().tokenize(text)
    }
}
