//! Timescale generation for timephased reporting.
//!
//! This module provides:
//! - [`Timescale`]: An ordered, contiguous run of half-open ranges
//! - [`TimescaleUnit`]: Granularity enumeration (Days, Weeks, Months, etc.)
//! - [`TimescaleBuilder`]: Builder pattern for constructing timescales
//! - [`make_timescale`]: Shorthand returning the ranges directly
//!
//! Timescales know nothing about working time; they are the buckets the
//! segmenter apportions timephased data into.

mod error;
#[allow(clippy::module_inception)]
mod timescale;
mod unit;

pub use error::TimescaleError;
pub use timescale::{make_timescale, Timescale, TimescaleBuilder};
pub use unit::TimescaleUnit;
