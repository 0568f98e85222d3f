use super::*;
use crate::emit::{Emit, Span, Token};
use crate::MatcherConfig;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn matcher_for(patterns: &[&str]) -> TopicMatcher {
    let mut builder = TrieBuilder::new();
    builder.insert_all(patterns);
    builder.into_matcher()
}

fn patterns_matching(matcher: &TopicMatcher, text: &str) -> Vec<String> {
    matcher
        .parse_text(text)
        .into_iter()
        .map(|e| e.pattern().to_string())
        .collect()
}

fn concat(tokens: &[Token<'_>]) -> String {
    tokens.iter().map(Token::fragment).collect()
}

#[test]
fn test_pattern_matches_itself() {
    for pattern in ["a", "hi.mom", "a.b.c.d", "x+y", "ä.ö"] {
        let matcher = matcher_for(&[pattern]);
        let emits: Vec<Emit> = matcher.parse_text(pattern).into_iter().collect();
        assert_eq!(emits.len(), 1, "{} should match itself", pattern);
        assert_eq!(emits[0].start(), 0);
        assert_eq!(emits[0].end(), pattern.chars().count() - 1);
        assert_eq!(emits[0].pattern(), pattern);
        assert_eq!(emits[0].index(), 0);
    }
}

#[test]
fn test_no_match_for_unrelated_text() {
    let matcher = matcher_for(&["hi.mom", "sports.+.score", "news.#"]);
    for text in ["", "hi", "hi.dad", "hi.mom.x", "sports.score", "newsx", "weather.today"] {
        assert!(
            matcher.parse_text(text).is_empty(),
            "{:?} should not match",
            text
        );
    }
}

#[test]
fn test_empty_trie_matches_nothing() {
    let matcher = matcher_for(&[]);
    assert!(matcher.parse_text("anything").is_empty());
    assert!(!matcher.is_match(""));
}

#[test]
fn test_case_insensitive() {
    let mut builder = TrieBuilder::with_config(MatcherConfig::new().case_insensitive());
    builder.insert("Hi.Mom");
    let matcher = builder.build();

    assert_eq!(patterns_matching(&matcher, "hi.mom"), vec!["Hi.Mom"]);
    assert_eq!(patterns_matching(&matcher, "HI.MOM"), vec!["Hi.Mom"]);
    assert_eq!(patterns_matching(&matcher, "Hi.Mom"), vec!["Hi.Mom"]);
}

#[test]
fn test_case_sensitive_by_default() {
    let matcher = matcher_for(&["Hi.Mom"]);
    assert!(matcher.is_match("Hi.Mom"));
    assert!(!matcher.is_match("hi.mom"));
    assert!(!matcher.is_match("HI.MOM"));
}

#[test]
fn test_single_level_wildcard() {
    let matcher = matcher_for(&["hi.+.how.are.you"]);
    assert!(matcher.is_match("hi.alex.how.are.you"));
    assert!(matcher.is_match("hi.james.how.are.you"));
    assert!(!matcher.is_match("hi.james.bond.how.are.you"));
    assert!(!matcher.is_match("hi.how.are.you"));
}

#[test]
fn test_single_level_wildcard_at_ends() {
    let matcher = matcher_for(&["+.status", "device.+"]);
    assert_eq!(patterns_matching(&matcher, "kitchen.status"), vec!["+.status"]);
    assert_eq!(patterns_matching(&matcher, "device.lamp"), vec!["device.+"]);
    assert!(!matcher.is_match("device.lamp.on"));
    assert!(!matcher.is_match("a.b.status"));
}

#[test]
fn test_multi_level_wildcard_suffix() {
    let matcher = matcher_for(&["im.#"]);
    assert!(matcher.is_match("im.patrick"));
    assert!(matcher.is_match("im.patrick.bond"));
    assert!(matcher.is_match("im.james.bond"));
    assert!(!matcher.is_match("im"));
    assert!(!matcher.is_match("you.patrick"));
}

#[test]
fn test_multi_level_wildcard_infix() {
    let matcher = matcher_for(&["im.#.bond"]);
    assert!(matcher.is_match("im.not.james.bond"));
    assert!(matcher.is_match("im.james.bond"));
    assert!(!matcher.is_match("im.not.james"));
    assert!(!matcher.is_match("im.not.james.bond.jr"));
}

#[test]
fn test_mixed_wildcards() {
    let matcher = matcher_for(&["a.+.c.#", "a.#.z"]);
    assert_eq!(patterns_matching(&matcher, "a.b.c.d.e"), vec!["a.+.c.#"]);
    assert_eq!(patterns_matching(&matcher, "a.b.c.z"), vec!["a.+.c.#", "a.#.z"]);
    assert!(!matcher.is_match("a.b.x.d"));
}

#[test]
fn test_wildcard_span_uses_pattern_length() {
    let matcher = matcher_for(&["im.#"]);
    let text = "im.patrick.bond";
    let emits: Vec<Emit> = matcher.parse_text(text).into_iter().collect();
    assert_eq!(emits.len(), 1);
    assert_eq!(emits[0].end(), text.len() - 1);
    assert_eq!(emits[0].start(), text.len() - "im.#".len());
    assert_eq!(emits[0].size(), 4);
}

#[test]
fn test_duplicate_patterns_report_each_emit() {
    let matcher = matcher_for(&["a.b", "a.+", "a.b"]);
    let emits: Vec<Emit> = matcher.parse_text("a.b").into_iter().collect();
    let found: Vec<(&str, usize)> = emits.iter().map(|e| (e.pattern(), e.index())).collect();
    assert_eq!(found, vec![("a.+", 1), ("a.b", 0), ("a.b", 2)]);
}

#[test]
fn test_parse_text_without_overlaps() {
    let matcher = matcher_for(&["a.b", "a.+", "a.#"]);
    let kept = matcher.parse_text_without_overlaps("a.b");
    assert_eq!(kept.len(), 1);
    for emit in &kept {
        assert_eq!((emit.start(), emit.end()), (0, 2));
    }
}

#[test]
fn test_tokenize_whole_match() {
    let matcher = matcher_for(&["hi.+"]);
    let tokens = matcher.tokenize("hi.x");
    assert_eq!(tokens.len(), 1);
    assert!(tokens[0].is_match());
    assert_eq!(tokens[0].fragment(), "hi.x");
}

#[test]
fn test_tokenize_leading_fragment() {
    // The wildcard span is shorter than the topic it matched
    let matcher = matcher_for(&["im.#"]);
    let tokens = matcher.tokenize("im.patrick.bond");
    assert_eq!(
        tokens.iter().map(Token::is_match).collect::<Vec<_>>(),
        vec![false, true]
    );
    assert_eq!(tokens[0].fragment(), "im.patrick.");
    assert_eq!(tokens[1].fragment(), "bond");
    assert_eq!(tokens[1].emit().map(Emit::pattern), Some("im.#"));
}

#[test]
fn test_tokenize_no_match() {
    let matcher = matcher_for(&["x.y"]);
    assert_eq!(matcher.tokenize("a.b"), vec![Token::Fragment("a.b")]);
    assert!(matcher.tokenize("").is_empty());
}

#[test]
fn test_tokenize_overlapping_emits_skip_later_ones() {
    let matcher = matcher_for(&["a.+.c", "a.#", "a.b.c"]);
    let tokens = matcher.tokenize("a.bbbb.c");
    assert_eq!(concat(&tokens), "a.bbbb.c");
    assert_eq!(tokens.iter().filter(|t| t.is_match()).count(), 1);
}

#[test]
fn test_tokenize_multibyte() {
    let matcher = matcher_for(&["ä.#"]);
    let text = "ä.öööö.ü";
    let tokens = matcher.tokenize(text);
    assert_eq!(concat(&tokens), text);
    assert_eq!(tokens.last().map(Token::fragment), Some("ö.ü"));
}

fn random_topic(rng: &mut StdRng, alphabet: &[char]) -> String {
    let levels = rng.random_range(1..=4);
    (0..levels)
        .map(|_| {
            let len = rng.random_range(1..=3);
            (0..len)
                .map(|_| alphabet[rng.random_range(0..alphabet.len())])
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join(".")
}

#[test]
fn test_tokenize_concatenation_invariant() {
    let mut rng = StdRng::seed_from_u64(1234);
    let mut builder = TrieBuilder::new();
    builder.insert_all(["a.#", "+"]);
    for _ in 0..30 {
        let mut pattern = random_topic(&mut rng, &['a', 'b']);
        if rng.random_bool(0.3) {
            pattern.push_str(".+");
        }
        if rng.random_bool(0.3) {
            pattern = format!("{}.#", pattern);
        }
        builder.insert(&pattern);
    }
    let matcher = builder.build();

    let mut matched = 0;
    for _ in 0..500 {
        let text = random_topic(&mut rng, &['a', 'b', 'é']);
        let tokens = matcher.tokenize(&text);
        assert_eq!(concat(&tokens), text);
        for pair in tokens.windows(2) {
            assert!(pair[0].is_match() || pair[1].is_match(), "two fragments in a row");
        }
        if tokens.iter().any(Token::is_match) {
            matched += 1;
        }
    }
    assert!(matched > 0);
}

#[test]
fn test_literal_patterns_match_only_themselves() {
    let mut rng = StdRng::seed_from_u64(99);
    let patterns: Vec<String> = (0..40).map(|_| random_topic(&mut rng, &['a', 'b', 'c'])).collect();
    let mut builder = TrieBuilder::new();
    builder.insert_all(&patterns);
    let matcher = builder.build();

    for _ in 0..300 {
        let text = random_topic(&mut rng, &['a', 'b', 'c']);
        let mut expected: Vec<(String, usize)> = patterns
            .iter()
            .enumerate()
            .filter(|(_, p)| **p == text)
            .map(|(i, p)| (p.clone(), i))
            .collect();
        expected.sort();
        let mut actual: Vec<(String, usize)> = matcher
            .parse_text(&text)
            .into_iter()
            .map(|e| (e.pattern().to_string(), e.index()))
            .collect();
        actual.sort();
        assert_eq!(actual, expected, "text {:?}", text);
    }
}

#[test]
fn test_buffers_reuse_gives_same_results() {
    let matcher = matcher_for(&["a.#", "a.+.c", "b"]);
    let mut bufs = matcher.buffers();
    for text in ["a.b.c", "b", "a.x", "zzz", "a.b.c"] {
        assert_eq!(matcher.parse_text_with(text, &mut bufs), matcher.parse_text(text));
    }
}
