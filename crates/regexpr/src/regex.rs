use std::fmt::Display;
use std::str::FromStr;

use log::{debug, trace};
use smol_str::SmolStr;

use crate::compiler::{self, Program};
use crate::engine;
use crate::error::RegexResult;
use crate::matcher::{Captures, Match, Matcher};
use crate::option::RegexOption;
use crate::pattern::parse_pattern;
use crate::span::Span;

/// A compiled regular expression.
///
/// Immutable after construction, so one `Regex` can be shared between
/// threads while each thread drives its own [`Matcher`].
#[derive(Debug, Clone)]
pub struct Regex {
    program: Program,
    pattern: SmolStr,
    option: RegexOption,
}

impl Regex {
    /// Compile the given string into a [Regex]
    ///
    /// Returns an error if the pattern is malformed. No partially
    /// compiled regex is ever produced.
    pub fn compile(pattern: &str) -> RegexResult<Self> {
        Self::with_option(pattern, RegexOption::default())
    }

    /// Same as [`compile`](Self::compile) but with a custom configuration
    pub fn with_option(pattern: &str, option: RegexOption) -> RegexResult<Self> {
        let program = parse_pattern(pattern)
            .and_then(|ast| compiler::compile(&ast, &option))
            .inspect_err(|err| debug!("failed to compile {pattern:?}: {err}"))?;

        debug!(
            "compiled {:?} into {} instructions ({} groups)",
            pattern,
            program.len(),
            program.group_count()
        );
        trace!("program for {pattern:?}:\n{program}");

        Ok(Self {
            program,
            pattern: SmolStr::new(pattern),
            option,
        })
    }

    /// Returns true if the regex matches anywhere in the given string
    ///
    /// Same result as checking whether [find_matches](Self::find_matches)
    /// yields at least one element.
    #[inline]
    pub fn test(&self, subject: &str) -> bool {
        engine::test(&self.program, subject)
    }

    /// Returns an [Iterator] over all the non-overlapping matches in `subject`
    pub fn find_matches<'r, 's>(&'r self, subject: &'s str) -> Matcher<'r, 's> {
        Matcher::new(self, subject)
    }

    /// Leftmost match in `subject`
    pub fn find<'s>(&self, subject: &'s str) -> Option<Match<'s>> {
        self.find_matches(subject).next()
    }

    /// Anchored attempt at byte offset `start`; no scanning forward.
    pub fn match_at(&self, subject: &str, start: usize) -> Option<Span> {
        engine::run(&self.program, subject, start)
    }

    /// Capture groups of the leftmost match
    pub fn captures<'s>(&self, subject: &'s str) -> Option<Captures<'s>> {
        engine::search_slots(&self.program, subject, 0).map(|slots| Captures::new(subject, slots))
    }

    /// The source pattern
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    /// Number of capture groups, not counting the whole match
    #[inline]
    pub fn group_count(&self) -> usize {
        self.program.group_count()
    }

    #[inline]
    pub fn option(&self) -> &RegexOption {
        &self.option
    }

    #[inline]
    pub(crate) fn program(&self) -> &Program {
        &self.program
    }
}

impl Display for Regex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.pattern)
    }
}

impl FromStr for Regex {
    type Err = crate::error::RegexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Regex::compile(s)
    }
}

/// Adds [matches_regex](Self::matches_regex) to any str-like value
pub trait RegexTestable {
    /// Returns true if it matches the given pattern.
    /// A pattern that fails to compile never matches.
    fn matches_regex(&self, pattern: impl AsRef<str>) -> bool;
}

impl<T: AsRef<str>> RegexTestable for T {
    fn matches_regex(&self, pattern: impl AsRef<str>) -> bool {
        Regex::compile(pattern.as_ref())
            .map(|regex| regex.test(self.as_ref()))
            .unwrap_or(false)
    }
}
