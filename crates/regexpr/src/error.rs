// Error types for pattern compilation.
// Matching itself never fails once a Regex exists.

use thiserror::Error;

/// Why a pattern was rejected by the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxErrorKind {
    /// `(` without a matching `)`
    UnclosedGroup,
    /// `)` without a matching `(`
    UnopenedGroup,
    /// `*`, `+`, `?` or `{` with nothing to repeat
    NothingToRepeat(char),
    /// `{` not followed by `n,m}`
    MalformedRepeat,
    /// `{n,m}` with `n > m`
    RepeatMinOverMax,
    /// a repetition bound above [`MAX_REPEAT`](crate::limits::MAX_REPEAT)
    RepeatTooLarge,
    /// `[` without `]`
    UnclosedSet,
    /// `[z-a]`
    ReversedRange(char, char),
    /// `\` at the end of the pattern
    TrailingEscape,
    /// `\1`, `\k<..>`: backreferences are not supported
    Backreference,
    /// groups or repetitions nested past [`MAX_NESTING_DEPTH`](crate::limits::MAX_NESTING_DEPTH)
    NestedTooDeep,
}

impl std::fmt::Display for SyntaxErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SyntaxErrorKind::UnclosedGroup => write!(f, "unclosed group, missing ')'"),
            SyntaxErrorKind::UnopenedGroup => write!(f, "unopened group, unexpected ')'"),
            SyntaxErrorKind::NothingToRepeat(c) => write!(f, "expected pattern before '{c}'"),
            SyntaxErrorKind::MalformedRepeat => {
                write!(f, "malformed repetition, expected '{{n,m}}'")
            }
            SyntaxErrorKind::RepeatMinOverMax => {
                write!(f, "repetition minimum is greater than maximum")
            }
            SyntaxErrorKind::RepeatTooLarge => write!(
                f,
                "repetition bound exceeds {}",
                crate::limits::MAX_REPEAT
            ),
            SyntaxErrorKind::UnclosedSet => write!(f, "unclosed character set, missing ']'"),
            SyntaxErrorKind::ReversedRange(a, b) => write!(f, "invalid range '{a}-{b}'"),
            SyntaxErrorKind::TrailingEscape => write!(f, "pattern ends with '\\'"),
            SyntaxErrorKind::Backreference => write!(f, "backreferences are not supported"),
            SyntaxErrorKind::NestedTooDeep => write!(f, "pattern nested too deeply"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegexError {
    /// Malformed pattern text. `offset` is the byte offset of the offending character.
    #[error("syntax error at offset {offset}: {kind}")]
    Syntax { offset: usize, kind: SyntaxErrorKind },
    /// The compiler produced an inconsistent program. Never expected for a parsed pattern.
    #[error("compile error: {0}")]
    Compile(String),
    #[error("compiled program has {len} instructions, limit is {limit}")]
    ProgramTooLarge { len: usize, limit: usize },
}

impl RegexError {
    pub fn syntax(offset: usize, kind: SyntaxErrorKind) -> Self {
        RegexError::Syntax { offset, kind }
    }

    pub fn is_syntax(&self) -> bool {
        matches!(self, RegexError::Syntax { .. })
    }
}

pub type RegexResult<T> = Result<T, RegexError>;
