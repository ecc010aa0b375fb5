//! Working-time calendars and the queries answered from them.
//!
//! This module provides:
//! - [`Calendar`]: Weekly pattern, exceptions and optional base calendar
//! - [`CalendarBuilder`]: Fluent, validating construction
//! - [`CalendarException`]: Date-range override of the weekly pattern
//! - [`DayType`]: Working, non-working or inherited weekday
//! - [`WorkingHours`]: Ordered, overlap-free ranges of one day
//!
//! Queries on [`Calendar`]: `working_ranges`, `is_working_day`,
//! `start_time`, `finish_time`, `working_spans`, `work_between`, `advance`,
//! `next_work_start`, `previous_work_finish`, `working_days_between`.
//!
//! # Examples
//!
//! ```
//! use calendar_core::calendar::Calendar;
//! use calendar_core::units::{Duration, TimeUnit};
//! use chrono::NaiveDate;
//!
//! let calendar = Calendar::standard("Standard");
//! let start = NaiveDate::from_ymd_opt(2006, 3, 14).unwrap().and_hms_opt(8, 0, 0).unwrap();
//! let end = NaiveDate::from_ymd_opt(2006, 3, 15).unwrap().and_hms_opt(8, 0, 0).unwrap();
//!
//! assert_eq!(calendar.work_between(start, end, TimeUnit::Days), Duration::days(1.0));
//! assert_eq!(calendar.advance(start, Duration::hours(8.0)).unwrap().format("%H:%M").to_string(), "17:00");
//! ```

mod builder;
mod day_type;
mod exception;
mod hours;
pub(crate) mod model;
mod walk;
mod work;

pub use builder::CalendarBuilder;
pub use day_type::DayType;
pub use exception::CalendarException;
pub use hours::WorkingHours;
pub use model::Calendar;
