//! Matcher configuration.

use std::borrow::Cow;

/// Options fixed when a trie is created.
///
/// ```
/// # use topicmatch::MatcherConfig;
/// let config = MatcherConfig::default().case_insensitive();
/// assert!(config.is_case_insensitive());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MatcherConfig {
    case_insensitive: bool,
}

impl MatcherConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lowercase both patterns and texts before comparing.
    pub fn case_insensitive(mut self) -> Self {
        self.case_insensitive = true;
        self
    }

    pub fn set_case_insensitive(&mut self, value: bool) {
        self.case_insensitive = value;
    }

    #[inline]
    pub fn is_case_insensitive(&self) -> bool {
        self.case_insensitive
    }

    /// Apply case folding to one symbol, if enabled.
    #[inline]
    pub(crate) fn fold(&self, c: char) -> char {
        if self.case_insensitive {
            fold_char(c)
        } else {
            c
        }
    }

    /// Apply case folding to a whole string, if enabled.
    pub(crate) fn fold_str<'a>(&self, s: &'a str) -> Cow<'a, str> {
        if self.case_insensitive && s.chars().any(|c| fold_char(c) != c) {
            Cow::Owned(s.chars().map(fold_char).collect())
        } else {
            Cow::Borrowed(s)
        }
    }
}

/// Lowercase `c` when its lowercase form is a single char.
///
/// Chars that lowercase to several chars (e.g. 'İ') are left alone so that
/// positions in the folded text line up with the input.
#[inline]
fn fold_char(c: char) -> char {
    if c.is_ascii() {
        return c.to_ascii_lowercase();
    }
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(l), None) => l,
        _ => c,
    }
}
