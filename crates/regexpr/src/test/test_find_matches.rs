// Tests for find_matches(): span sequences, termination, determinism
use crate::*;

fn spans(pattern: &str, subject: &str) -> Vec<Span> {
    let regex = Regex::compile(pattern).unwrap();
    regex.find_matches(subject).map(|m| m.span()).collect()
}

fn assert_well_formed(pattern: &str, subject: &str) {
    let found = spans(pattern, subject);
    assert!(
        found.len() <= subject.len() + 1,
        "{pattern:?} on {subject:?} produced {} spans",
        found.len()
    );
    for span in &found {
        assert!(span.end() <= subject.len());
        assert!(span.slice(subject).is_some());
    }
    for pair in found.windows(2) {
        assert!(pair[1].offset >= pair[0].end(), "overlap in {found:?}");
        assert!(pair[1].offset > pair[0].offset, "not increasing in {found:?}");
    }
}

#[test]
fn test_two_abc_matches() {
    assert_eq!(spans("(abc|def)", "abcabc"), vec![Span::new(0, 3), Span::new(3, 3)]);
    assert_eq!(spans("abc", "abcabc").len(), 2);
}

#[test]
fn test_alternation_sequence() {
    assert_eq!(
        spans("(abc|def)", "abcdefabc"),
        vec![Span::new(0, 3), Span::new(3, 3), Span::new(6, 3)]
    );
    assert_eq!(spans("(abc|def)", "abcdds"), vec![Span::new(0, 3)]);
}

#[test]
fn test_leftmost_first_tie_break() {
    assert_eq!(spans("(a|ab)", "ab"), vec![Span::new(0, 1)]);
    assert_eq!(spans("(ab|a)", "ab"), vec![Span::new(0, 2)]);
}

#[test]
fn test_wildcard_star_takes_rest() {
    assert_eq!(spans("abc.*", "abcdds"), vec![Span::new(0, 6)]);
    assert_eq!(spans("abc.*", "xabc"), vec![Span::new(1, 3)]);
}

#[test]
fn test_find_matches_slices() {
    let regex = Regex::compile("A(bc)*D").unwrap();
    let mut matches = regex.find_matches("AD_AD");

    let m = matches.next().unwrap();
    assert_eq!(m.span(), Span::new(0, 2));
    assert_eq!(m.as_str(), "AD");

    let m = matches.next().unwrap();
    assert_eq!(m.span(), Span::new(3, 2));
    assert_eq!(m.as_str(), "AD");

    assert!(matches.next().is_none());
}

#[test]
fn test_empty_pattern_advances() {
    assert_eq!(
        spans("", "AD"),
        vec![Span::new(0, 0), Span::new(1, 0), Span::new(2, 0)]
    );
    assert_eq!(spans("", ""), vec![Span::new(0, 0)]);
}

#[test]
fn test_empty_match_advances_by_char() {
    // 'é' is two bytes: the cursor must skip to 2, not 1
    assert_eq!(
        spans("x*", "é"),
        vec![Span::new(0, 0), Span::new(2, 0)]
    );
}

#[test]
fn test_empty_match_after_nonempty() {
    assert_eq!(
        spans("a*", "aab"),
        vec![Span::new(0, 2), Span::new(2, 0), Span::new(3, 0)]
    );
}

#[test]
fn test_lazy_vs_greedy_counts() {
    let subject = "aaaaaabaaaaaab";
    assert_eq!(spans(".*?b", subject).len(), 2);
    assert_eq!(spans(".*b", subject).len(), 1);
    assert_eq!(spans(".+?b", subject).len(), 2);
    assert_eq!(spans(".+b", subject).len(), 1);
}

#[test]
fn test_anchored_pattern_matches_once() {
    assert_eq!(spans("^a", "aaa"), vec![Span::new(0, 1)]);
    assert_eq!(spans("a$", "aaa"), vec![Span::new(2, 1)]);
}

#[test]
fn test_exhaustion_is_sticky() {
    let regex = Regex::compile("b").unwrap();
    let mut matcher = regex.find_matches("abc");
    assert_eq!(matcher.cursor(), Some(0));
    assert_eq!(matcher.next().map(|m| m.span()), Some(Span::new(1, 1)));
    assert_eq!(matcher.cursor(), Some(2));
    assert!(matcher.next().is_none());
    assert!(matcher.is_exhausted());
    assert_eq!(matcher.cursor(), None);
    for _ in 0..3 {
        assert!(matcher.next().is_none());
    }
}

#[test]
fn test_test_agrees_with_find_matches() {
    let patterns = [
        "", "abc", "(abc|def)", "abc.*", "a*", "^b", "b$", "[^a]", "(a|b)+c?", "x{2,3}", "é+",
    ];
    let subjects = ["", "a", "b", "abc", "abcdef", "ba", "xxxx", "éé", "aab"];
    for pattern in patterns {
        let regex = Regex::compile(pattern).unwrap();
        for subject in subjects {
            assert_eq!(
                regex.test(subject),
                regex.find_matches(subject).next().is_some(),
                "{pattern:?} on {subject:?}"
            );
            assert_eq!(regex.find(subject), regex.find_matches(subject).next());
            assert_well_formed(pattern, subject);
        }
    }
}

#[test]
fn test_deterministic_across_compilations() {
    let subject = "abcdefabcxxdefabc";
    for pattern in ["(abc|def)", "(a|ab)(c|bcd)", ".*?c", "[a-c]+"] {
        assert_eq!(spans(pattern, subject), spans(pattern, subject));
    }
}

#[test]
fn test_size_hint_bounds_remaining() {
    let regex = Regex::compile("").unwrap();
    let matcher = regex.find_matches("abc");
    assert_eq!(matcher.size_hint(), (0, Some(4)));
    assert_eq!(matcher.count(), 4);
}

#[test]
fn test_pathological_nested_repetition_finishes() {
    let regex = Regex::compile("(a*)*(a|b)*c").unwrap();
    let subject = "ab".repeat(100);
    assert!(!regex.test(&subject));
    assert_eq!(regex.find_matches(&subject).count(), 0);
}
