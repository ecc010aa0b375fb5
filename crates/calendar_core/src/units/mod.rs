//! Unit conventions and conversions.
//!
//! This module provides:
//! - [`TimeUnit`]: Working and elapsed duration units
//! - [`CalendarProperties`]: Fixed minutes per day/week/month/year
//! - [`Duration`]: A signed amount in a unit, with conversion between units
//! - [`Rate`], [`to_hourly`], [`from_hourly`]: Amount-per-time normalisation
//!
//! Conversions here are pure arithmetic. They never look at which dates of a
//! calendar are working; a day is always `minutes_per_day` long. Date-aware
//! measurement lives in [`crate::calendar::Calendar::work_between`].
//!
//! # Examples
//!
//! ```
//! use calendar_core::units::{CalendarProperties, Duration, TimeUnit};
//!
//! let props = CalendarProperties::default();
//! let week = Duration::new(1.0, TimeUnit::Weeks);
//! assert_eq!(week.convert_units(TimeUnit::Hours, &props).amount(), 40.0);
//! ```

mod duration;
mod properties;
mod rate;
mod time_unit;

pub use duration::Duration;
pub use properties::CalendarProperties;
pub use rate::{from_hourly, to_hourly, Rate};
pub use time_unit::TimeUnit;
