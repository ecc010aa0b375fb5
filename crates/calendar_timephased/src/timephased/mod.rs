//! Timephased work and cost data and its apportionment into timescales.
//!
//! This module provides:
//! - [`TimephasedWork`] and [`TimephasedCost`]: Spans carrying an hourly density
//! - [`TimephasedBaseline`]: Parallel planned item lists, indexed 0 to 10
//! - [`segment()`] and its work, cost and baseline variants
//! - [`WorkContour`] and [`contour_items`]: Shaped work allocations
//!
//! Bucket results are `Option`s: `None` means no working time or no item
//! data, which is distinct from `Some(0.0)`.

mod baseline;
mod contour;
mod error;
mod item;
mod segment;

pub use baseline::{TimephasedBaseline, MAX_BASELINE};
pub use contour::{contour_items, WorkContour, CONTOUR_SLICES};
pub use error::SegmentError;
pub use item::{Timephased, TimephasedCost, TimephasedWork};
pub use segment::{
    segment, segment_baseline_cost, segment_baseline_work, segment_cost, segment_work,
};
