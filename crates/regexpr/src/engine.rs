//! Matching engine.
//!
//! Backtracking over a compiled [`Program`] with an explicit work stack
//! instead of native recursion, so deeply nested patterns cannot overflow
//! the call stack. Split instructions push their second target and follow
//! the first, which yields leftmost-first semantics: left alternatives and
//! greedy iterations win ties.
//!
//! Each `(pc, pos)` pair is explored at most once per search. Whether a
//! state can reach `Match` depends only on the pair, never on how it was
//! reached, so a second visit would fail the same way. This terminates
//! empty loops such as `(a*)*` and bounds the work of a search by
//! `program length * (subject length + 1)`.

use std::collections::HashSet;

use ahash::RandomState;

use crate::compiler::{Inst, Program};
use crate::pattern::char_eq;
use crate::span::Span;

/// Capture slot registers: `slots[2i]` / `slots[2i + 1]` are the start and end of group `i`.
pub type Slots = Vec<Option<usize>>;

enum Job {
    /// Resume execution at `pc` with the input at byte offset `pos`
    Explore { pc: usize, pos: usize },
    /// Undo a `Save` on the way back
    Restore { slot: usize, old: Option<usize> },
}

struct Backtracker<'p, 's> {
    prog: &'p Program,
    subject: &'s str,
    stack: Vec<Job>,
    visited: HashSet<(usize, usize), RandomState>,
    slots: Slots,
}

impl<'p, 's> Backtracker<'p, 's> {
    fn new(prog: &'p Program, subject: &'s str) -> Self {
        Self {
            prog,
            subject,
            stack: Vec::new(),
            visited: HashSet::with_hasher(RandomState::new()),
            slots: vec![None; prog.n_slots],
        }
    }

    #[inline]
    fn char_at(&self, pos: usize) -> Option<char> {
        self.subject[pos..].chars().next()
    }

    /// Try to match starting exactly at `start`. On success `self.slots` holds the captures.
    fn attempt(&mut self, start: usize) -> bool {
        self.stack.clear();
        self.slots.iter_mut().for_each(|s| *s = None);
        self.stack.push(Job::Explore { pc: 0, pos: start });

        while let Some(job) = self.stack.pop() {
            match job {
                Job::Restore { slot, old } => self.slots[slot] = old,
                Job::Explore { pc, pos } => {
                    if self.step(pc, pos) {
                        return true;
                    }
                }
            }
        }
        false
    }

    /// Follow one thread until it matches or dies. Alternatives are pushed on the stack.
    fn step(&mut self, mut pc: usize, mut pos: usize) -> bool {
        let fold = self.prog.case_insensitive;
        loop {
            if !self.visited.insert((pc, pos)) {
                return false;
            }

            match &self.prog.insts[pc] {
                Inst::Match => return true,
                Inst::Char(expected) => match self.char_at(pos) {
                    Some(c) if char_eq(*expected, c, fold) => {
                        pc += 1;
                        pos += c.len_utf8();
                    }
                    _ => return false,
                },
                Inst::Any => match self.char_at(pos) {
                    Some(c) => {
                        pc += 1;
                        pos += c.len_utf8();
                    }
                    None => return false,
                },
                Inst::Set(set) => match self.char_at(pos) {
                    Some(c) if set.matches(c, fold) => {
                        pc += 1;
                        pos += c.len_utf8();
                    }
                    _ => return false,
                },
                Inst::AssertStart => {
                    if pos != 0 {
                        return false;
                    }
                    pc += 1;
                }
                Inst::AssertEnd => {
                    if pos != self.subject.len() {
                        return false;
                    }
                    pc += 1;
                }
                Inst::Jump(target) => pc = *target,
                Inst::Split(first, second) => {
                    self.stack.push(Job::Explore { pc: *second, pos });
                    pc = *first;
                }
                Inst::Save(slot) => {
                    let old = self.slots[*slot].replace(pos);
                    self.stack.push(Job::Restore { slot: *slot, old });
                    pc += 1;
                }
            }
        }
    }
}

#[inline]
fn whole_match(slots: &Slots) -> Option<Span> {
    match (slots.first().copied().flatten(), slots.get(1).copied().flatten()) {
        (Some(start), Some(end)) => Some(Span::from_bounds(start, end)),
        _ => None,
    }
}

/// Anchored attempt: match beginning exactly at byte offset `start`.
/// Returns `None` if `start` is past the end or not on a character boundary.
pub fn run(prog: &Program, subject: &str, start: usize) -> Option<Span> {
    if !subject.is_char_boundary(start) {
        return None;
    }
    let mut bt = Backtracker::new(prog, subject);
    if bt.attempt(start) {
        whole_match(&bt.slots)
    } else {
        None
    }
}

/// Unanchored search for the leftmost match starting at or after `from`.
/// Returns the capture slots of that match.
pub fn search_slots(prog: &Program, subject: &str, from: usize) -> Option<Slots> {
    if !subject.is_char_boundary(from) {
        return None;
    }

    // FAST PATH: plain literal pattern, no groups, plain substring search
    if let Some(literal) = &prog.literal {
        let start = from + subject[from..].find(literal.as_str())?;
        let mut slots = vec![None; prog.n_slots];
        slots[0] = Some(start);
        slots[1] = Some(start + literal.len());
        return Some(slots);
    }

    if prog.anchored_start && from > 0 {
        return None;
    }

    let mut bt = Backtracker::new(prog, subject);
    let mut start = from;
    loop {
        if bt.attempt(start) {
            return Some(bt.slots);
        }
        if prog.anchored_start {
            return None;
        }
        match bt.char_at(start) {
            Some(c) => start += c.len_utf8(),
            None => return None,
        }
    }
}

/// Unanchored search; returns the span of the leftmost match at or after `from`.
pub fn search(prog: &Program, subject: &str, from: usize) -> Option<Span> {
    search_slots(prog, subject, from).and_then(|slots| whole_match(&slots))
}

/// Does the pattern match anywhere in `subject`?
#[inline]
pub fn test(prog: &Program, subject: &str) -> bool {
    search(prog, subject, 0).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::compile;
    use crate::option::RegexOption;
    use crate::pattern::parse_pattern;

    fn prog(pattern: &str) -> Program {
        compile(&parse_pattern(pattern).unwrap(), &RegexOption::default()).unwrap()
    }

    #[test]
    fn test_run_is_anchored() {
        let p = prog("abc");
        assert_eq!(run(&p, "xabc", 0), None);
        assert_eq!(run(&p, "xabc", 1), Some(Span::new(1, 3)));
    }

    #[test]
    fn test_run_rejects_bad_offsets() {
        let p = prog(".");
        assert_eq!(run(&p, "é", 1), None);
        assert_eq!(run(&p, "ab", 3), None);
    }

    #[test]
    fn test_search_leftmost() {
        let p = prog("b+");
        assert_eq!(search(&p, "abbcb", 0), Some(Span::new(1, 2)));
        assert_eq!(search(&p, "abbcb", 3), Some(Span::new(4, 1)));
        assert_eq!(search(&p, "abbcb", 5), None);
    }

    #[test]
    fn test_search_empty_at_end() {
        let p = prog("$");
        assert_eq!(search(&p, "abc", 0), Some(Span::new(3, 0)));
    }

    #[test]
    fn test_alternation_first_branch_wins() {
        // leftmost-first, not leftmost-longest
        let p = prog("(a|ab)");
        assert_eq!(run(&p, "ab", 0), Some(Span::new(0, 1)));
        let p = prog("(ab|a)");
        assert_eq!(run(&p, "ab", 0), Some(Span::new(0, 2)));
    }

    #[test]
    fn test_greedy_backtracks_for_rest() {
        let p = prog("a.*c");
        assert_eq!(run(&p, "abcbc", 0), Some(Span::new(0, 5)));
        let p = prog("a.*?c");
        assert_eq!(run(&p, "abcbc", 0), Some(Span::new(0, 3)));
    }

    #[test]
    fn test_empty_loop_terminates() {
        let p = prog("(a*)*b");
        assert_eq!(search(&p, "aaac", 0), None);
        assert_eq!(search(&p, "aab", 0), Some(Span::new(0, 3)));
    }

    #[test]
    fn test_nested_star_does_not_explode() {
        let p = prog("(a*)*$");
        let subject = "a".repeat(200) + "b";
        assert_eq!(search(&p, &subject, 0), Some(Span::new(201, 0)));
    }

    #[test]
    fn test_literal_fast_path_matches_slow_path() {
        let fast = prog("abc");
        assert!(fast.literal.is_some());
        let slow = prog("(abc)");
        assert!(slow.literal.is_none());
        for subject in ["", "abc", "xxabcabc", "ab"] {
            assert_eq!(search(&fast, subject, 0), search(&slow, subject, 0));
        }
    }

    #[test]
    fn test_search_slots_groups() {
        let p = prog("(a+)(b)?c");
        let slots = search_slots(&p, "xaac", 0).unwrap();
        assert_eq!(slots, vec![Some(1), Some(4), Some(1), Some(3), None, None]);
    }

    #[test]
    fn test_multibyte_steps() {
        let p = prog("é.");
        assert_eq!(search(&p, "aéz", 0), Some(Span::new(1, 3)));
    }
}
