// Character set matching
// Handles [abc], [a-z], [^...] and simple case folding

/// A bracketed character set: a list of inclusive ranges, optionally negated.
/// A single character `c` is stored as the range `(c, c)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharSet {
    ranges: Vec<(char, char)>,
    negated: bool,
}

impl CharSet {
    pub fn new(negated: bool) -> Self {
        Self {
            ranges: Vec::new(),
            negated,
        }
    }

    pub fn push_char(&mut self, c: char) {
        self.ranges.push((c, c));
    }

    /// Add `lo..=hi`. The parser rejects reversed ranges before calling this.
    pub fn push_range(&mut self, lo: char, hi: char) {
        debug_assert!(lo <= hi);
        self.ranges.push((lo, hi));
    }

    pub fn is_negated(&self) -> bool {
        self.negated
    }

    pub fn ranges(&self) -> &[(char, char)] {
        &self.ranges
    }

    #[inline]
    fn contains(&self, c: char) -> bool {
        self.ranges.iter().any(|&(lo, hi)| lo <= c && c <= hi)
    }

    /// Check whether `c` belongs to the set. With `fold` set, any simple case
    /// variant of `c` landing in a range counts as a hit.
    #[inline]
    pub fn matches(&self, c: char, fold: bool) -> bool {
        let hit = if fold {
            case_variants(c).into_iter().any(|v| self.contains(v))
        } else {
            self.contains(c)
        };
        hit != self.negated
    }
}

/// Simple (one-to-one) lowercase mapping. Characters whose lowercase form
/// expands to several characters are left alone.
#[inline]
pub fn simple_lower(c: char) -> char {
    if c.is_ascii() {
        return c.to_ascii_lowercase();
    }
    let mut it = c.to_lowercase();
    match (it.next(), it.next()) {
        (Some(l), None) => l,
        _ => c,
    }
}

#[inline]
fn simple_upper(c: char) -> char {
    if c.is_ascii() {
        return c.to_ascii_uppercase();
    }
    let mut it = c.to_uppercase();
    match (it.next(), it.next()) {
        (Some(u), None) => u,
        _ => c,
    }
}

#[inline]
fn case_variants(c: char) -> [char; 3] {
    [c, simple_lower(c), simple_upper(c)]
}

/// Character equality used by the engine.
#[inline(always)]
pub fn char_eq(expected: char, actual: char, fold: bool) -> bool {
    expected == actual || (fold && simple_lower(expected) == simple_lower(actual))
}
