// Compiled program: a flat NFA encoded as instructions

use std::fmt::Display;

use smol_str::SmolStr;

use crate::error::{RegexError, RegexResult};
use crate::pattern::CharSet;

/// One NFA state. Control flows to `pc + 1` unless stated otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inst {
    /// Consume one character equal to the operand
    Char(char),
    /// Consume any one character
    Any,
    /// Consume one character in the set
    Set(CharSet),
    /// Epsilon fork; the first target has priority
    Split(usize, usize),
    /// Epsilon jump
    Jump(usize),
    /// Record the current position in a capture slot
    Save(usize),
    /// Succeed only at offset 0
    AssertStart,
    /// Succeed only at the end of the subject
    AssertEnd,
    /// Accepting state
    Match,
}

#[derive(Debug, Clone)]
pub struct Program {
    pub insts: Vec<Inst>,
    /// Number of capture slots, two per group including group 0
    pub n_slots: usize,
    /// Every match starts at offset 0
    pub anchored_start: bool,
    pub case_insensitive: bool,
    /// Set when the whole pattern is a plain literal; enables substring search
    pub literal: Option<SmolStr>,
}

impl Program {
    #[inline]
    pub fn len(&self) -> usize {
        self.insts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.insts.is_empty()
    }

    pub fn group_count(&self) -> usize {
        self.n_slots / crate::limits::SLOTS_PER_GROUP - 1
    }

    /// Check the structural invariants: jump targets are in range, save slots
    /// exist, the last instruction accepts, and every instruction is reachable
    /// from the entry at index 0.
    pub fn validate(&self) -> RegexResult<()> {
        let n = self.insts.len();
        if !matches!(self.insts.last(), Some(Inst::Match)) {
            return Err(RegexError::Compile(
                "program does not end with Match".to_string(),
            ));
        }

        for (pc, inst) in self.insts.iter().enumerate() {
            let bad = match inst {
                Inst::Split(a, b) => *a >= n || *b >= n,
                Inst::Jump(t) => *t >= n,
                Inst::Save(slot) => *slot >= self.n_slots,
                _ => false,
            };
            if bad {
                return Err(RegexError::Compile(format!(
                    "instruction {pc} ({inst}) points outside the program"
                )));
            }
        }

        let mut seen = vec![false; n];
        let mut stack = vec![0usize];
        while let Some(pc) = stack.pop() {
            if std::mem::replace(&mut seen[pc], true) {
                continue;
            }
            match &self.insts[pc] {
                Inst::Split(a, b) => {
                    stack.push(*a);
                    stack.push(*b);
                }
                Inst::Jump(t) => stack.push(*t),
                Inst::Match => {}
                _ => stack.push(pc + 1),
            }
        }
        if let Some(pc) = seen.iter().position(|s| !s) {
            return Err(RegexError::Compile(format!(
                "instruction {pc} is unreachable"
            )));
        }
        Ok(())
    }
}

impl Display for Inst {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Inst::Char(c) => write!(f, "char {c:?}"),
            Inst::Any => write!(f, "any"),
            Inst::Set(set) => {
                write!(f, "set{} ", if set.is_negated() { " not" } else { "" })?;
                for (lo, hi) in set.ranges() {
                    if lo == hi {
                        write!(f, "{lo:?}")?;
                    } else {
                        write!(f, "{lo:?}-{hi:?}")?;
                    }
                }
                Ok(())
            }
            Inst::Split(a, b) => write!(f, "split {a}, {b}"),
            Inst::Jump(t) => write!(f, "jump {t}"),
            Inst::Save(slot) => write!(f, "save {slot}"),
            Inst::AssertStart => write!(f, "assert start"),
            Inst::AssertEnd => write!(f, "assert end"),
            Inst::Match => write!(f, "match"),
        }
    }
}

impl Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (pc, inst) in self.insts.iter().enumerate() {
            writeln!(f, "{pc:>4}: {inst}")?;
        }
        Ok(())
    }
}
