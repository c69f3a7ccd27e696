//! Layered error types
//!
//! The engine never reports "no match" as an error: a miss is a low
//! confidence result. Errors here are contract violations by the caller.

use textanchor_core::CoreError;
use thiserror::Error;

/// Engine-level errors (Application Layer)
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// Core algorithm error
    #[error("core algorithm error: {0}")]
    Core(#[from] CoreError),

    /// Malformed request
    #[error("invalid input: {reason}")]
    InvalidInput {
        /// The reason why the input is invalid
        reason: String,
    },

    /// A chunk boundary whose end lies before its start
    #[error("invalid chunk boundary at index {index}")]
    InvalidChunkBoundary {
        /// Index of the offending boundary
        index: usize,
    },

    /// A span range missing required fields or with inverted offsets
    #[error("invalid span range '{id}': {reason}")]
    InvalidRange {
        /// Range identifier (may be empty when that is the problem)
        id: String,
        /// What is wrong with it
        reason: String,
    },

    /// Configuration error
    #[error("invalid configuration: {0}")]
    ConfigError(String),
}

impl EngineError {
    pub(crate) fn invalid_input(reason: impl Into<String>) -> Self {
        EngineError::InvalidInput {
            reason: reason.into(),
        }
    }
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = EngineError::InvalidChunkBoundary { index: 3 };
        assert_eq!(err.to_string(), "invalid chunk boundary at index 3");

        let err = EngineError::invalid_input("total chunks must be positive");
        assert_eq!(err.to_string(), "invalid input: total chunks must be positive");
    }

    #[test]
    fn test_core_error_conversion() {
        let err: EngineError = CoreError::InvertedRange { start: 4, end: 1 }.into();
        assert!(matches!(err, EngineError::Core(_)));
        assert!(err.to_string().starts_with("core algorithm error"));
    }
}
