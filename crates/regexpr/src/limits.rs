//! Centralized engine limits.
//!
//! All magic numbers that bound parsing and compilation are collected here
//! so they can be tuned in one place.

// ===== Parser =====

/// Maximum nesting depth of groups and repetitions.
/// Both the parser and the compiler recurse once per level.
pub const MAX_NESTING_DEPTH: usize = 200;

/// Largest bound accepted in a counted repetition `{n,m}`.
pub const MAX_REPEAT: u32 = 1000;

// ===== Compiler =====

/// Default cap on the number of instructions in a compiled program.
/// `a{1000}{1000}` and friends are rejected instead of allocating
/// millions of instructions.
pub const DEFAULT_MAX_PROGRAM_LEN: usize = 1 << 20;

// ===== Captures =====

/// Number of save slots used per capture group (start and end).
pub const SLOTS_PER_GROUP: usize = 2;
