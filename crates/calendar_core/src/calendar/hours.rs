//! Ordered, non-overlapping working ranges for one day.

use crate::types::{ConfigurationError, TimeRange};
use std::ops::Deref;

/// The working ranges of a single day, kept sorted by start.
///
/// Every insertion is checked against the ranges already present, so a
/// `WorkingHours` value never contains two overlapping ranges. A range may
/// end at (or continue past) midnight; overlap with the following day's
/// ranges is resolved when working time is queried.
///
/// # Examples
///
/// ```
/// use calendar_core::calendar::WorkingHours;
///
/// let mut hours = WorkingHours::new();
/// hours.add("13:00-17:00".parse().unwrap()).unwrap();
/// hours.add("08:00-12:00".parse().unwrap()).unwrap();
/// assert_eq!(hours[0].to_string(), "08:00-12:00");
/// assert_eq!(hours.total_minutes(), 480);
///
/// assert!(hours.add("11:00-14:00".parse().unwrap()).is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct WorkingHours(pub(super) Vec<TimeRange>);

impl WorkingHours {
    /// An empty set of hours.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Builds hours from any collection of ranges.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::OverlappingRanges` if any two overlap.
    pub fn from_ranges<I>(ranges: I) -> Result<Self, ConfigurationError>
    where
        I: IntoIterator<Item = TimeRange>,
    {
        let mut hours = Self::new();
        for range in ranges {
            hours.add(range)?;
        }
        Ok(hours)
    }

    /// Inserts `range` at its sorted position.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::OverlappingRanges` if it overlaps a
    /// range already present; the hours are left unchanged.
    pub fn add(&mut self, range: TimeRange) -> Result<&mut Self, ConfigurationError> {
        let index = self.0.partition_point(|r| r.start_minute() < range.start_minute());
        let mut neighbours = index
            .checked_sub(1)
            .and_then(|i| self.0.get(i))
            .into_iter()
            .chain(self.0.get(index));
        if let Some(existing) = neighbours.find(|r| r.overlaps(&range)) {
            return Err(ConfigurationError::OverlappingRanges {
                range,
                existing: *existing,
            });
        }
        self.0.insert(index, range);
        Ok(self)
    }

    /// Removes every range.
    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// The ranges, sorted by start.
    #[inline]
    pub fn ranges(&self) -> &[TimeRange] {
        &self.0
    }

    /// Sum of the range lengths in minutes.
    pub fn total_minutes(&self) -> i64 {
        self.0.iter().map(TimeRange::duration_minutes).sum()
    }
}

impl Deref for WorkingHours {
    type Target = [TimeRange];

    fn deref(&self) -> &[TimeRange] {
        &self.0
    }
}

impl<'a> IntoIterator for &'a WorkingHours {
    type Item = &'a TimeRange;
    type IntoIter = std::slice::Iter<'a, TimeRange>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
