// Tests for compile errors
use crate::*;

fn kind_of(pattern: &str) -> SyntaxErrorKind {
    match Regex::compile(pattern) {
        Err(RegexError::Syntax { kind, .. }) => kind,
        Err(other) => panic!("{pattern:?}: unexpected error {other}"),
        Ok(_) => panic!("{pattern:?} should not compile"),
    }
}

#[test]
fn test_unbalanced_group() {
    let err = Regex::compile("(abc").unwrap_err();
    assert!(err.is_syntax());
    assert_eq!(
        err,
        RegexError::Syntax {
            offset: 0,
            kind: SyntaxErrorKind::UnclosedGroup
        }
    );
    assert_eq!(kind_of("abc)"), SyntaxErrorKind::UnopenedGroup);
}

#[test]
fn test_dangling_operators() {
    for c in ['?', '*', '+'] {
        let err = Regex::compile(&c.to_string()).unwrap_err();
        assert_eq!(
            err.to_string(),
            format!("syntax error at offset 0: expected pattern before '{c}'")
        );
    }
    assert_eq!(kind_of("{2}"), SyntaxErrorKind::NothingToRepeat('{'));
    assert_eq!(kind_of("(|*)"), SyntaxErrorKind::NothingToRepeat('*'));
}

#[test]
fn test_invalid_bounds() {
    assert_eq!(kind_of("a{3,1}"), SyntaxErrorKind::RepeatMinOverMax);
    assert_eq!(kind_of("a{1;2}"), SyntaxErrorKind::MalformedRepeat);
    assert_eq!(kind_of("a{2000}"), SyntaxErrorKind::RepeatTooLarge);
}

#[test]
fn test_unsupported_backreferences() {
    assert_eq!(kind_of("^(.)c\\1$"), SyntaxErrorKind::Backreference);
    assert_eq!(kind_of("(a)\\k<1>"), SyntaxErrorKind::Backreference);
}

#[test]
fn test_program_too_large() {
    let option = RegexOption::default().max_program_len(64);
    let err = Regex::with_option("(abc){100}", option).unwrap_err();
    assert!(matches!(err, RegexError::ProgramTooLarge { limit: 64, .. }));
    assert!(!err.is_syntax());

    // Same pattern fits the default limit
    assert!(Regex::compile("(abc){100}").is_ok());
}

#[test]
fn test_error_display() {
    let err = Regex::compile("x[z-a]").unwrap_err();
    assert_eq!(err.to_string(), "syntax error at offset 2: invalid range 'z-a'");
}
