//! Segmentation error types.

use calendar_core::types::CalendarError;
use thiserror::Error;

/// Errors that can occur while building or segmenting timephased data.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SegmentError {
    /// Items or buckets were unsorted, overlapping or reversed.
    #[error("Precondition violated: {reason}")]
    Precondition {
        /// What was wrong with the input.
        reason: String,
    },

    /// A calendar query failed.
    #[error("Calendar error: {0}")]
    Calendar(#[from] CalendarError),
}
