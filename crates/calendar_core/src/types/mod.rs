//! Time and error types shared by the calendar engine.
//!
//! This module provides:
//! - `time`: Day-relative working ranges ([`TimeRange`]), absolute ranges
//!   ([`DateTimeRange`]) and walk [`Direction`]
//! - `error`: Structured error types for configuration and query failures
//!
//! # Re-exports
//!
//! - [`TimeRange`], [`DateTimeRange`], [`Direction`], [`midnight`], [`MINUTES_PER_DAY`] from `time`
//! - [`CalendarError`], [`ConfigurationError`] from `error`

pub mod error;
pub mod time;

pub use error::{CalendarError, ConfigurationError};
pub use time::{midnight, DateTimeRange, Direction, TimeRange, MINUTES_PER_DAY};
