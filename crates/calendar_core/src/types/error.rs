//! Error types for calendar construction and working-time queries.
//!
//! This module provides:
//! - `ConfigurationError`: Invalid calendar data, detected when it is added
//! - `CalendarError`: Errors surfaced by calendar queries

use super::time::{Direction, TimeRange};
use chrono::{NaiveDate, NaiveDateTime};
use thiserror::Error;

/// Invalid calendar configuration.
///
/// Raised eagerly by the mutating operations of a calendar so that a
/// calendar which has been built successfully is always consistent.
///
/// # Examples
/// ```
/// use calendar_core::types::ConfigurationError;
///
/// let err = ConfigurationError::CyclicBase {
///     calendar: "Night".to_string(),
///     base: "Standard".to_string(),
/// };
/// assert_eq!(
///     format!("{}", err),
///     "Calendar 'Night' cannot derive from 'Standard': the base chain already contains 'Night'"
/// );
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// Two working ranges of one day share working minutes.
    #[error("Working range {range} overlaps existing range {existing}")]
    OverlappingRanges {
        /// The range being added.
        range: TimeRange,
        /// The range already present.
        existing: TimeRange,
    },

    /// Two exceptions of one calendar cover a common date.
    #[error(
        "Exception {from}..={to} overlaps existing exception {existing_from}..={existing_to}"
    )]
    OverlappingExceptions {
        /// First date of the exception being added.
        from: NaiveDate,
        /// Last date of the exception being added.
        to: NaiveDate,
        /// First date of the existing exception.
        existing_from: NaiveDate,
        /// Last date of the existing exception.
        existing_to: NaiveDate,
    },

    /// An exception whose first date is after its last date.
    #[error("Exception start {from} is after its end {to}")]
    InvalidExceptionRange {
        /// First date.
        from: NaiveDate,
        /// Last date.
        to: NaiveDate,
    },

    /// Deriving from `base` would make the calendar its own ancestor.
    #[error(
        "Calendar '{calendar}' cannot derive from '{base}': the base chain already contains '{calendar}'"
    )]
    CyclicBase {
        /// The calendar being configured.
        calendar: String,
        /// The proposed base calendar.
        base: String,
    },
}

/// Errors returned by calendar operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CalendarError {
    /// The calendar definition is inconsistent.
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// No working time can be reached from the anchor in the walk direction.
    #[error("Calendar '{calendar}' has no working time {direction} {anchor}")]
    NoWorkingTime {
        /// Name of the calendar walked.
        calendar: String,
        /// Instant the walk started from.
        anchor: NaiveDateTime,
        /// Direction of the walk.
        direction: Direction,
    },

    /// The caller supplied arguments outside the operation's contract.
    #[error("Precondition violated: {reason}")]
    Precondition {
        /// Description of the violated precondition.
        reason: String,
    },

    /// Date arithmetic left the representable range.
    #[error("Date arithmetic overflow: {reason}")]
    DateOverflow {
        /// Reason for the overflow.
        reason: String,
    },
}
