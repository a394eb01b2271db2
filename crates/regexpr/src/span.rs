use std::fmt::Display;
use std::ops::Range;

/// A half-open byte range `[offset, offset + length)` inside a subject string.
///
/// `#[repr(C)]` because the C bindings hand it out as-is.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Span {
    pub offset: usize,
    pub length: usize,
}

impl Span {
    #[inline]
    pub fn new(offset: usize, length: usize) -> Self {
        Self { offset, length }
    }

    /// Build a span from a start and end byte offset. `end` must not precede `start`.
    #[inline]
    pub fn from_bounds(start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        Self {
            offset: start,
            length: end - start,
        }
    }

    #[inline]
    pub fn end(&self) -> usize {
        self.offset + self.length
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    #[inline]
    pub fn range(&self) -> Range<usize> {
        self.offset..self.end()
    }

    /// Slice `subject` with this span. Returns `None` if the span does not fit
    /// or does not fall on character boundaries.
    pub fn slice<'s>(&self, subject: &'s str) -> Option<&'s str> {
        subject.get(self.range())
    }
}

impl Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut start = itoa::Buffer::new();
        let mut end = itoa::Buffer::new();
        write!(f, "[{}:{}]", start.format(self.offset), end.format(self.end()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_bounds() {
        let span = Span::from_bounds(3, 6);
        assert_eq!(span, Span::new(3, 3));
        assert_eq!(span.end(), 6);
        assert_eq!(span.range(), 3..6);
        assert!(!span.is_empty());
        assert!(Span::new(4, 0).is_empty());
    }

    #[test]
    fn test_span_slice() {
        let subject = "abcdef";
        assert_eq!(Span::new(3, 3).slice(subject), Some("def"));
        assert_eq!(Span::new(6, 0).slice(subject), Some(""));
        assert_eq!(Span::new(5, 3).slice(subject), None);
        // 'é' is two bytes; offset 1 splits it
        assert_eq!(Span::new(1, 1).slice("é"), None);
    }

    #[test]
    fn test_span_display() {
        assert_eq!(Span::new(3, 3).to_string(), "[3:6]");
        assert_eq!(Span::new(0, 0).to_string(), "[0:0]");
    }
}
