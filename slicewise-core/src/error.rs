//! Error types for chunking operations

use thiserror::Error;

/// Errors raised by the chunkers
///
/// Argument validation is the only failure mode. Tokenizer resolution problems
/// are never surfaced here; they downgrade to the whitespace tokenizer instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChunkError {
    /// A size or overlap parameter is out of range
    #[error("invalid argument: {name} {reason}")]
    InvalidArgument {
        /// Name of the offending parameter (e.g. `max_tokens`)
        name: &'static str,
        /// Human-readable constraint that was violated
        reason: &'static str,
    },
}

impl ChunkError {
    /// Name of the parameter that failed validation
    pub fn parameter(&self) -> &'static str {
        match self {
            ChunkError::InvalidArgument { name, .. } => name,
        }
    }
}

/// Result type for chunking operations
pub type Result<T> = std::result::Result<T, ChunkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_display() {
        let error = ChunkError::InvalidArgument {
            name: "max_tokens",
            reason: "must be > 0",
        };
        assert_eq!(error.to_string(), "invalid argument: max_tokens must be > 0");
        assert_eq!(error.parameter(), "max_tokens");
    }

    #[test]
    fn test_error_trait_implementation() {
        let error = ChunkError::InvalidArgument {
            name: "overlap_chars",
            reason: "must be >= 0",
        };
        let _: &dyn std::error::Error = &error;
        assert!(format!("{error:?}").contains("InvalidArgument"));
    }
}
