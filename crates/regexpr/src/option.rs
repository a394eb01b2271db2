use crate::limits::DEFAULT_MAX_PROGRAM_LEN;

/// Options fixed at compile time and carried by every [`Regex`](crate::Regex).
///
/// `#[repr(C)]` so the same struct can be passed through the C bindings.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RegexOption {
    /// Compare characters by their simple case fold.
    pub case_insensitive: bool,
    /// Maximum number of instructions the compiled program may contain.
    pub max_program_len: usize,
}

impl Default for RegexOption {
    fn default() -> Self {
        Self {
            case_insensitive: false,
            max_program_len: DEFAULT_MAX_PROGRAM_LEN,
        }
    }
}

impl RegexOption {
    pub fn case_insensitive(mut self, yes: bool) -> Self {
        self.case_insensitive = yes;
        self
    }

    pub fn max_program_len(mut self, len: usize) -> Self {
        self.max_program_len = len;
        self
    }
}
