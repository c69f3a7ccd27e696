//! Core error types (deterministic only)

use core::fmt;

/// Core algorithm errors (no I/O, no external failures)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A char offset points past the end of the text
    OffsetOutOfRange {
        /// The offending offset
        offset: usize,
        /// Length of the text in chars
        len: usize,
    },
    /// A range whose end lies before its start
    InvertedRange {
        /// Start offset
        start: usize,
        /// End offset
        end: usize,
    },
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoreError::OffsetOutOfRange { offset, len } => {
                write!(f, "offset {offset} out of range for text of {len} chars")
            }
            CoreError::InvertedRange { start, end } => {
                write!(f, "range end {end} lies before start {start}")
            }
        }
    }
}

impl std::error::Error for CoreError {}

/// Result type for core operations
pub type Result<T> = core::result::Result<T, CoreError>;
