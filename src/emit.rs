//! Match spans and tokens produced by the topic automaton.
//!
//! All positions are `char` indices into the matched text, inclusive on both
//! ends. A span `[3, 5]` covers three characters.

use std::cmp::Ordering;
use std::fmt;

use crate::TopicMatchError;

/// Anything with an inclusive `[start, end]` range.
///
/// Implemented by [`Interval`] and [`Emit`] so the interval tree can work on
/// either one.
pub trait Span {
    fn start(&self) -> usize;
    fn end(&self) -> usize;

    /// Number of positions covered by the span.
    #[inline]
    fn size(&self) -> usize {
        self.end() - self.start() + 1
    }

    /// True when the two spans share at least one position.
    #[inline]
    fn overlaps_with<S: Span + ?Sized>(&self, other: &S) -> bool {
        self.start() <= other.end() && self.end() >= other.start()
    }

    /// True when `point` lies inside the span.
    #[inline]
    fn contains_point(&self, point: usize) -> bool {
        self.start() <= point && point <= self.end()
    }

    /// The part of `text` this span covers, counting positions in chars.
    fn text_in<'t>(&self, text: &'t str) -> Result<&'t str, TopicMatchError> {
        let offsets = CharOffsets::new(text);
        if self.end() >= offsets.char_len() {
            return Err(TopicMatchError::SpanOutOfBounds {
                start: self.start(),
                end: self.end(),
                len: offsets.char_len(),
            });
        }
        Ok(offsets.slice(text, self.start(), self.end() + 1))
    }
}

/// An inclusive index range into a text.
///
/// Ordering is by start, then end.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Interval {
    start: usize,
    end: usize,
}

impl Interval {
    /// Create an interval. `start` must not exceed `end`.
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "interval start {} > end {}", start, end);
        Self { start, end }
    }

    /// Checked constructor for ranges coming from outside the crate.
    pub fn try_new(start: usize, end: usize) -> Result<Self, TopicMatchError> {
        if start > end {
            return Err(TopicMatchError::InvalidInterval { start, end });
        }
        Ok(Self { start, end })
    }
}

impl Span for Interval {
    #[inline]
    fn start(&self) -> usize {
        self.start
    }

    #[inline]
    fn end(&self) -> usize {
        self.end
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start, self.end)
    }
}

/// A match of one inserted pattern ending at a given position.
///
/// `index` is the 0-based insertion index of the pattern. Two inserts of the
/// same text produce emits that differ only by index.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Emit {
    interval: Interval,
    pattern: String,
    index: usize,
}

impl Emit {
    pub fn new(start: usize, end: usize, pattern: impl Into<String>, index: usize) -> Self {
        Self {
            interval: Interval::new(start, end),
            pattern: pattern.into(),
            index,
        }
    }

    /// The pattern text as it was inserted.
    #[inline]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn interval(&self) -> Interval {
        self.interval
    }
}

impl Span for Emit {
    #[inline]
    fn start(&self) -> usize {
        self.interval.start
    }

    #[inline]
    fn end(&self) -> usize {
        self.interval.end
    }
}

impl Ord for Emit {
    fn cmp(&self, other: &Self) -> Ordering {
        self.interval
            .cmp(&other.interval)
            .then_with(|| self.pattern.cmp(&other.pattern))
            .then_with(|| self.index.cmp(&other.index))
    }
}

impl PartialOrd for Emit {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Emit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}#{}", self.interval, self.pattern, self.index)
    }
}

/// One piece of a tokenized text: either plain text or a match.
///
/// A full tokenization covers the input with no gaps and no overlaps, so
/// concatenating every fragment gives back the original text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token<'t> {
    Fragment(&'t str),
    Match { fragment: &'t str, emit: Emit },
}

impl<'t> Token<'t> {
    #[inline]
    pub fn is_match(&self) -> bool {
        matches!(self, Token::Match { .. })
    }

    /// The slice of the input this token covers.
    #[inline]
    pub fn fragment(&self) -> &'t str {
        match self {
            Token::Fragment(fragment) | Token::Match { fragment, .. } => *fragment,
        }
    }

    #[inline]
    pub fn emit(&self) -> Option<&Emit> {
        match self {
            Token::Fragment(_) => None,
            Token::Match { emit, .. } => Some(emit),
        }
    }
}

/// Byte offset of every char boundary in a text.
pub(crate) struct CharOffsets {
    /// `bytes[i]` is where char `i` starts; the last entry is `text.len()`
    bytes: Vec<usize>,
}

impl CharOffsets {
    pub(crate) fn new(text: &str) -> Self {
        let mut bytes: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
        bytes.push(text.len());
        Self { bytes }
    }

    #[inline]
    pub(crate) fn char_len(&self) -> usize {
        self.bytes.len() - 1
    }

    /// Chars `[from, to)` of `text`, clamped to the text.
    pub(crate) fn slice<'t>(&self, text: &'t str, from: usize, to: usize) -> &'t str {
        let last = self.char_len();
        let to = to.min(last);
        let from = from.min(to);
        &text[self.bytes[from]..self.bytes[to]]
    }
}
