//! # Regular Expressions
//! A small backtracking regular expression engine. Patterns are compiled
//! once into a [Regex] and reused for [testing](Regex::test) and for
//! [iterating](Regex::find_matches) over non-overlapping match spans.
//!
//! ## Example
//! ```rust
//! use regexpr::{Regex, Span};
//!
//! let regex = Regex::compile("(abc|def)").unwrap();
//! assert!(regex.test("abcdds"));
//!
//! let spans: Vec<Span> = regex.find_matches("abcabc").map(|m| m.span()).collect();
//! assert_eq!(spans, [Span::new(0, 3), Span::new(3, 3)]);
//! ```
//!
//! ## Syntax
//!
//! | Rule  | Meaning |
//! |---------|---------|
//! | `.` | any character |
//! | `*` `+` `?` | zero or more, one or more, optional |
//! | `{n,m}` | between n and m times; a missing bound means no limit |
//! | `*?` `+?` `??` `{n,m}?` | lazy versions of the above |
//! | `[a-z01]` `[^...]` | character set, negated set |
//! | `A\|B` | A, or else B (the left alternative wins) |
//! | `(AB)` | capture group |
//! | `^` `$` | start and end of the subject |
//! | `\c` | the character `c`, literally |
//!
//! Spans are byte offsets into the subject.

#[cfg(test)]
mod test;

pub mod compiler;
pub mod engine;
pub mod error;
#[cfg(feature = "ffi")]
pub mod ffi;
pub mod limits;
pub mod matcher;
pub mod option;
pub mod pattern;
pub mod regex;
pub mod span;

pub use error::{RegexError, RegexResult, SyntaxErrorKind};
pub use matcher::{Captures, Match, Matcher};
pub use option::RegexOption;
pub use regex::{Regex, RegexTestable};
pub use span::Span;
