//! # calendar_core: Working-Time Calendar Engine
//!
//! calendar_core answers the two questions every scheduler, project file
//! reader and report renderer asks of a calendar:
//! - how much working time lies between two instants (`Calendar::work_between`)
//! - which instant is reached after a given amount of working time
//!   (`Calendar::advance`)
//!
//! ## Modules
//!
//! - `types`: Working ranges, absolute ranges and error types
//! - `units`: Duration units, calendar-wide conventions and rate conversion
//! - `calendar`: The calendar model, exceptions, derived calendars and the
//!   work/date calculator
//!
//! ## Local Wall-Clock Time
//!
//! Every instant is a `chrono::NaiveDateTime`. No time zone is involved and
//! daylight-saving changes are not observed, so a span crossing a clock
//! change is measured by the minutes the wall clock shows.
//!
//! ## Usage Examples
//!
//! ```rust
//! use calendar_core::calendar::Calendar;
//! use calendar_core::units::{Duration, TimeUnit};
//! use chrono::NaiveDate;
//!
//! let mut calendar = Calendar::standard("Standard");
//! let holiday = NaiveDate::from_ymd_opt(2006, 3, 14).unwrap();
//! calendar.add_exception(holiday, holiday).unwrap();
//!
//! let start = NaiveDate::from_ymd_opt(2006, 3, 13).unwrap().and_hms_opt(8, 0, 0).unwrap();
//! let end = NaiveDate::from_ymd_opt(2006, 3, 24).unwrap().and_hms_opt(16, 0, 0).unwrap();
//! let work = calendar.work_between(start, end, TimeUnit::Days);
//! assert!((work.amount() - 8.875).abs() < 1e-9);
//!
//! let finish = calendar.advance(start, Duration::days(2.0)).unwrap();
//! assert_eq!(finish.date(), NaiveDate::from_ymd_opt(2006, 3, 15).unwrap());
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Serialisation for ranges, units, durations, rates,
//!   properties, day types, working hours and exceptions

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod calendar;
pub mod types;
pub mod units;
