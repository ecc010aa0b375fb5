//! # calendar_timephased: Timescales and Timephased Segmentation
//!
//! Builds on `calendar_core` to turn timephased work and cost allocations
//! into per-period totals for reports and exports:
//! - `timescale`: contiguous day, week, third-of-month, month, quarter,
//!   half-year and year ranges
//! - `timephased`: work/cost items, baselines, contours and the segmenter
//!   apportioning items into timescale buckets by working time
//!
//! ## Usage Examples
//!
//! ```rust
//! use calendar_core::calendar::Calendar;
//! use calendar_core::units::{Duration, TimeUnit};
//! use calendar_timephased::timephased::{contour_items, segment_work, WorkContour};
//! use calendar_timephased::timescale::{make_timescale, TimescaleUnit};
//! use chrono::NaiveDate;
//!
//! let calendar = Calendar::standard("Standard");
//! let start = NaiveDate::from_ymd_opt(2026, 1, 26).unwrap().and_hms_opt(8, 0, 0).unwrap();
//! let items = contour_items(
//!     &calendar,
//!     start,
//!     Duration::days(5.0),
//!     Duration::hours(40.0),
//!     WorkContour::Flat,
//! )
//! .unwrap();
//!
//! let days = make_timescale(start, TimescaleUnit::Days, 7).unwrap();
//! let per_day = segment_work(&calendar, &items, &days, TimeUnit::Hours).unwrap();
//! assert_eq!(per_day[0].map(|d| d.amount()), Some(8.0));
//! assert_eq!(per_day[5], None); // Saturday
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Serialisation for timescale units, items, baselines
//!   and contours

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod timephased;
pub mod timescale;
