//! Timescale generation error types.

use thiserror::Error;

/// Errors that can occur during timescale generation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TimescaleError {
    /// Missing required field in builder.
    #[error("Missing required field: {field}")]
    MissingField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// A timescale must contain at least one range.
    #[error("Timescale must contain at least one range")]
    ZeroCount,

    /// Date arithmetic overflow.
    #[error("Date arithmetic overflow: {reason}")]
    DateOverflow {
        /// Reason for the overflow.
        reason: String,
    },
}
