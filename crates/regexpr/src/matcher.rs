use std::fmt::Display;
use std::iter::FusedIterator;

use log::trace;

use crate::engine::{self, Slots};
use crate::regex::Regex;
use crate::span::Span;

/// Represents a match of a string on a [Regex]
///
/// This struct is produced when iterating over a [`Matcher`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match<'s> {
    span: Span,
    slice: &'s str,
}

impl<'s> Match<'s> {
    fn new(subject: &'s str, span: Span) -> Self {
        Self {
            span,
            slice: &subject[span.range()],
        }
    }

    /// Byte span of the match inside the subject.
    #[inline]
    pub fn span(&self) -> Span {
        self.span
    }

    #[inline]
    pub fn start(&self) -> usize {
        self.span.offset
    }

    #[inline]
    pub fn end(&self) -> usize {
        self.span.end()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.span.length
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.span.is_empty()
    }

    /// The matched part of the subject.
    #[inline]
    pub fn as_str(&self) -> &'s str {
        self.slice
    }
}

impl Display for Match<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {:?}", self.span, self.slice)
    }
}

/// Capture group positions for a single match. Group 0 is the whole match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Captures<'s> {
    subject: &'s str,
    slots: Slots,
}

impl<'s> Captures<'s> {
    pub(crate) fn new(subject: &'s str, slots: Slots) -> Self {
        Self { subject, slots }
    }

    /// Number of groups, including group 0.
    pub fn len(&self) -> usize {
        self.slots.len() / crate::limits::SLOTS_PER_GROUP
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// The match for group `index`, or `None` if the group did not take part.
    pub fn get(&self, index: usize) -> Option<Match<'s>> {
        let start = (*self.slots.get(index * 2)?)?;
        let end = (*self.slots.get(index * 2 + 1)?)?;
        Some(Match::new(self.subject, Span::from_bounds(start, end)))
    }

    /// Whole-match shortcut, same as `get(0)`.
    pub fn whole(&self) -> Option<Match<'s>> {
        self.get(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = Option<Match<'s>>> + '_ {
        (0..self.len()).map(|i| self.get(i))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Ready(usize),
    Exhausted,
}

/// Iterator over all the non-overlapping matches of a [Regex] in a subject.
///
/// Borrows both the regex and the subject; neither can be dropped or
/// mutated while the matcher is alive. Once [`next`](Iterator::next)
/// returns `None` it keeps returning `None`.
#[derive(Debug, Clone)]
pub struct Matcher<'r, 's> {
    regex: &'r Regex,
    subject: &'s str,
    state: State,
    last: Option<Slots>,
}

impl<'r, 's> Matcher<'r, 's> {
    pub(crate) fn new(regex: &'r Regex, subject: &'s str) -> Self {
        Self {
            regex,
            subject,
            state: State::Ready(0),
            last: None,
        }
    }

    pub fn regex(&self) -> &'r Regex {
        self.regex
    }

    pub fn subject(&self) -> &'s str {
        self.subject
    }

    /// Byte offset where the next search starts, or `None` once exhausted.
    pub fn cursor(&self) -> Option<usize> {
        match self.state {
            State::Ready(cursor) => Some(cursor),
            State::Exhausted => None,
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.state == State::Exhausted
    }

    /// Capture groups of the match most recently returned by `next`.
    ///
    /// ```rust
    /// use regexpr::Regex;
    ///
    /// let regex = Regex::compile("(a+)(b)?").unwrap();
    /// let mut matcher = regex.find_matches("aab a");
    /// while let Some(_) = matcher.next() {
    ///     let groups = matcher.captures().unwrap();
    ///     assert!(groups.get(1).is_some());
    /// }
    /// ```
    pub fn captures(&self) -> Option<Captures<'s>> {
        self.last
            .as_ref()
            .map(|slots| Captures::new(self.subject, slots.clone()))
    }

    fn exhaust(&mut self, cursor: usize) {
        trace!(
            "matcher for {:?} exhausted at offset {}",
            self.regex.as_str(),
            cursor
        );
        self.state = State::Exhausted;
        self.last = None;
    }
}

impl<'s> Iterator for Matcher<'_, 's> {
    type Item = Match<'s>;

    fn next(&mut self) -> Option<Self::Item> {
        let State::Ready(cursor) = self.state else {
            return None;
        };
        if cursor > self.subject.len() {
            self.exhaust(cursor);
            return None;
        }

        let Some(slots) = engine::search_slots(self.regex.program(), self.subject, cursor) else {
            self.exhaust(cursor);
            return None;
        };
        let (Some(start), Some(end)) = (slots[0], slots[1]) else {
            self.exhaust(cursor);
            return None;
        };

        // An empty match must still move the cursor forward by one character
        let next = if start == end {
            end + self.subject[end..].chars().next().map_or(1, char::len_utf8)
        } else {
            end
        };
        self.state = State::Ready(next);
        self.last = Some(slots);

        Some(Match::new(self.subject, Span::from_bounds(start, end)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.state {
            State::Ready(cursor) => (0, Some(self.subject.len().saturating_sub(cursor) + 1)),
            State::Exhausted => (0, Some(0)),
        }
    }
}

impl FusedIterator for Matcher<'_, '_> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_accessors() {
        let m = Match::new("xxabc", Span::new(2, 3));
        assert_eq!(m.start(), 2);
        assert_eq!(m.end(), 5);
        assert_eq!(m.len(), 3);
        assert_eq!(m.as_str(), "abc");
        assert_eq!(m.to_string(), "[2:5]: \"abc\"");
    }

    #[test]
    fn test_captures_get() {
        let caps = Captures::new("abc", vec![Some(0), Some(3), Some(1), Some(2), None, None]);
        assert_eq!(caps.len(), 3);
        assert_eq!(caps.whole().map(|m| m.as_str()), Some("abc"));
        assert_eq!(caps.get(1).map(|m| m.as_str()), Some("b"));
        assert!(caps.get(2).is_none());
        assert!(caps.get(3).is_none());
        assert_eq!(caps.iter().filter(Option::is_some).count(), 2);
    }
}
