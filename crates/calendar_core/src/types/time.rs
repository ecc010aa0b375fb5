//! Time-of-day ranges and absolute date-time ranges.
//!
//! This module provides:
//! - [`TimeRange`]: A working range within one calendar day, stored as minute
//!   offsets from local midnight
//! - [`DateTimeRange`]: A half-open interval between two local date-times
//! - [`Direction`]: Walk direction for working-time navigation
//!
//! All arithmetic is local wall-clock time. No time zone is attached to any
//! value and clock shifts are not observed.

use super::error::CalendarError;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike};
use std::fmt;
use std::str::FromStr;

/// Minutes in one calendar day.
pub const MINUTES_PER_DAY: u32 = 1440;

/// Returns local midnight at the start of `date`.
#[inline]
pub fn midnight(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// A working range within a single calendar day.
///
/// The range is stored as `[start, end)` minute offsets from local midnight.
/// The start offset is always below 1440; the end offset is strictly greater
/// than the start and may exceed 1440 when the range continues past midnight.
///
/// Construction from two times of day follows these rules:
/// - `end > start`: an ordinary range within the day
/// - `end == 00:00`: the range runs until the following midnight
/// - `end == start`: a full 24-hour span
/// - `end < start`: the range wraps past midnight into the next day
///
/// # Examples
///
/// ```
/// use calendar_core::types::TimeRange;
/// use chrono::NaiveTime;
///
/// let morning = TimeRange::new(
///     NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
///     NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
/// );
/// assert_eq!(morning.duration_minutes(), 240);
///
/// let evening: TimeRange = "08:30-00:00".parse().unwrap();
/// assert_eq!(evening.end_minute(), 1440);
/// assert!(evening.ends_at_midnight());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimeRange {
    start: u32,
    end: u32,
}

impl TimeRange {
    /// Creates a range from two times of day. Seconds are truncated.
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        let start = start.hour() * 60 + start.minute();
        let end = end.hour() * 60 + end.minute();
        let end = if end <= start {
            end + MINUTES_PER_DAY
        } else {
            end
        };
        Self { start, end }
    }

    /// Creates a range from raw minute offsets.
    ///
    /// # Errors
    ///
    /// Returns `CalendarError::Precondition` unless `start < 1440`,
    /// `start < end` and `end - start <= 1440`.
    pub fn from_minutes(start: u32, end: u32) -> Result<Self, CalendarError> {
        if start >= MINUTES_PER_DAY || end <= start || end - start > MINUTES_PER_DAY {
            return Err(CalendarError::Precondition {
                reason: format!("invalid minute offsets for a working range: {start}..{end}"),
            });
        }
        Ok(Self { start, end })
    }

    /// Unchecked constructor for compile-time constants.
    pub(crate) const fn from_offsets(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Start offset in minutes from midnight.
    #[inline]
    pub fn start_minute(&self) -> u32 {
        self.start
    }

    /// End offset in minutes from midnight; may exceed 1440.
    #[inline]
    pub fn end_minute(&self) -> u32 {
        self.end
    }

    /// Length of the range in minutes.
    #[inline]
    pub fn duration_minutes(&self) -> i64 {
        i64::from(self.end - self.start)
    }

    /// Start as a time of day.
    pub fn start_time(&self) -> NaiveTime {
        minute_to_time(self.start)
    }

    /// End as a time of day. A range ending at midnight reports `00:00`.
    pub fn end_time(&self) -> NaiveTime {
        minute_to_time(self.end % MINUTES_PER_DAY)
    }

    /// Whether the range ends exactly at the following midnight.
    #[inline]
    pub fn ends_at_midnight(&self) -> bool {
        self.end == MINUTES_PER_DAY
    }

    /// Whether the range continues into the following day beyond midnight.
    #[inline]
    pub fn spills_past_midnight(&self) -> bool {
        self.end > MINUTES_PER_DAY
    }

    /// Whether two ranges of the same day share any minute.
    #[inline]
    pub fn overlaps(&self, other: &TimeRange) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Anchors this range to `date`, producing an absolute interval.
    pub fn on(&self, date: NaiveDate) -> DateTimeRange {
        let base = midnight(date);
        let at = |offset: u32| {
            base.checked_add_signed(TimeDelta::minutes(i64::from(offset)))
                .unwrap_or(NaiveDateTime::MAX)
        };
        DateTimeRange {
            start: at(self.start),
            end: at(self.end),
        }
    }
}

fn minute_to_time(minute: u32) -> NaiveTime {
    NaiveTime::from_num_seconds_from_midnight_opt(minute * 60, 0).unwrap_or(NaiveTime::MIN)
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}",
            self.start_time().format("%H:%M"),
            self.end_time().format("%H:%M")
        )
    }
}

impl FromStr for TimeRange {
    type Err = String;

    /// Parses `"HH:MM-HH:MM"`; `"24:00"` is accepted as an alias for midnight.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (start, end) = s
            .split_once('-')
            .ok_or_else(|| format!("Invalid time range (expected HH:MM-HH:MM): {}", s))?;
        let parse = |part: &str| {
            let part = part.trim();
            let part = if part == "24:00" { "00:00" } else { part };
            NaiveTime::parse_from_str(part, "%H:%M")
                .map_err(|e| format!("Invalid time '{}' in range '{}': {}", part, s, e))
        };
        Ok(TimeRange::new(parse(start)?, parse(end)?))
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use super::TimeRange;
    use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
    use std::str::FromStr;

    impl Serialize for TimeRange {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            serializer.collect_str(self)
        }
    }

    impl<'de> Deserialize<'de> for TimeRange {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            let s = String::deserialize(deserializer)?;
            TimeRange::from_str(&s).map_err(de::Error::custom)
        }
    }
}

/// A half-open interval `[start, end)` between two local date-times.
///
/// # Examples
///
/// ```
/// use calendar_core::types::DateTimeRange;
/// use chrono::NaiveDate;
///
/// let day = NaiveDate::from_ymd_opt(2026, 1, 28).unwrap();
/// let range = DateTimeRange::new(
///     day.and_hms_opt(8, 0, 0).unwrap(),
///     day.and_hms_opt(17, 0, 0).unwrap(),
/// )
/// .unwrap();
/// assert_eq!(range.duration_minutes(), 540.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DateTimeRange {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl DateTimeRange {
    /// Creates a range.
    ///
    /// # Errors
    ///
    /// Returns `CalendarError::Precondition` when `end` precedes `start`.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self, CalendarError> {
        if end < start {
            return Err(CalendarError::Precondition {
                reason: format!("range end {end} precedes its start {start}"),
            });
        }
        Ok(Self { start, end })
    }

    /// Creates a range from two instants in either order.
    pub fn spanning(a: NaiveDateTime, b: NaiveDateTime) -> Self {
        if a <= b {
            Self { start: a, end: b }
        } else {
            Self { start: b, end: a }
        }
    }

    /// The whole of `date`, midnight to midnight.
    pub fn day(date: NaiveDate) -> Self {
        let start = midnight(date);
        let end = date.succ_opt().map(midnight).unwrap_or(NaiveDateTime::MAX);
        Self { start, end }
    }

    /// Inclusive start.
    #[inline]
    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    /// Exclusive end.
    #[inline]
    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    /// Length as a chrono duration.
    #[inline]
    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }

    /// Length in (possibly fractional) minutes.
    pub fn duration_minutes(&self) -> f64 {
        self.duration().num_milliseconds() as f64 / 60_000.0
    }

    /// Whether the range covers no time at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Whether `instant` lies within `[start, end)`.
    #[inline]
    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        self.start <= instant && instant < self.end
    }

    /// Whether the two ranges share a non-empty interval.
    #[inline]
    pub fn overlaps(&self, other: &DateTimeRange) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// The common part of both ranges, if non-empty.
    pub fn intersection(&self, other: &DateTimeRange) -> Option<DateTimeRange> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        (start < end).then_some(DateTimeRange { start, end })
    }

    pub(crate) fn with_start(self, start: NaiveDateTime) -> Self {
        Self { start, ..self }
    }

    pub(crate) fn with_end(self, end: NaiveDateTime) -> Self {
        Self { end, ..self }
    }
}

impl fmt::Display for DateTimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {})",
            self.start.format("%Y-%m-%dT%H:%M"),
            self.end.format("%Y-%m-%dT%H:%M")
        )
    }
}

/// Direction of a working-time walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards later instants.
    Forward,
    /// Towards earlier instants.
    Backward,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Forward => write!(f, "after"),
            Direction::Backward => write!(f, "before"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, 0)
            .unwrap()
    }

    #[test]
    fn test_time_range_within_day() {
        let range = TimeRange::new(hm(8, 0), hm(12, 0));
        assert_eq!(range.start_minute(), 480);
        assert_eq!(range.end_minute(), 720);
        assert_eq!(range.duration_minutes(), 240);
        assert!(!range.ends_at_midnight());
        assert!(!range.spills_past_midnight());
    }

    #[test]
    fn test_time_range_ending_at_midnight() {
        let range = TimeRange::new(hm(8, 30), hm(0, 0));
        assert_eq!(range.end_minute(), 1440);
        assert_eq!(range.duration_minutes(), 930);
        assert!(range.ends_at_midnight());
        assert_eq!(range.end_time(), hm(0, 0));
    }

    #[test]
    fn test_time_range_equal_bounds_is_full_day() {
        let range = TimeRange::new(hm(0, 0), hm(0, 0));
        assert_eq!(range.duration_minutes(), 1440);

        let shifted = TimeRange::new(hm(6, 0), hm(6, 0));
        assert_eq!(shifted.duration_minutes(), 1440);
        assert!(shifted.spills_past_midnight());
    }

    #[test]
    fn test_time_range_wraps_past_midnight() {
        let range = TimeRange::new(hm(22, 0), hm(6, 0));
        assert_eq!(range.start_minute(), 1320);
        assert_eq!(range.end_minute(), 1800);
        assert_eq!(range.duration_minutes(), 480);
    }

    #[test]
    fn test_time_range_from_minutes_validation() {
        assert!(TimeRange::from_minutes(480, 720).is_ok());
        assert!(TimeRange::from_minutes(720, 720).is_err());
        assert!(TimeRange::from_minutes(1440, 1500).is_err());
        assert!(TimeRange::from_minutes(0, 1441).is_err());
    }

    #[test]
    fn test_time_range_overlaps() {
        let a = TimeRange::new(hm(8, 0), hm(12, 0));
        let b = TimeRange::new(hm(11, 0), hm(13, 0));
        let c = TimeRange::new(hm(12, 0), hm(13, 0));
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_time_range_parse_and_display() {
        let range: TimeRange = "13:00-17:00".parse().unwrap();
        assert_eq!(range.to_string(), "13:00-17:00");

        let night: TimeRange = "08:30-24:00".parse().unwrap();
        assert_eq!(night.end_minute(), 1440);
        assert_eq!(night.to_string(), "08:30-00:00");

        assert!("0800-1200".parse::<TimeRange>().is_err());
        assert!("08:00-25:00".parse::<TimeRange>().is_err());
    }

    #[test]
    fn test_time_range_on_date() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 28).unwrap();
        let span = TimeRange::new(hm(8, 30), hm(0, 0)).on(date);
        assert_eq!(span.start(), at(2024, 2, 28, 8, 30));
        assert_eq!(span.end(), at(2024, 2, 29, 0, 0));
    }

    #[test]
    fn test_date_time_range_rejects_reversed_bounds() {
        let result = DateTimeRange::new(at(2024, 1, 2, 0, 0), at(2024, 1, 1, 0, 0));
        assert!(matches!(result, Err(CalendarError::Precondition { .. })));
    }

    #[test]
    fn test_date_time_range_intersection() {
        let a = DateTimeRange::new(at(2024, 1, 1, 8, 0), at(2024, 1, 1, 12, 0)).unwrap();
        let b = DateTimeRange::new(at(2024, 1, 1, 11, 0), at(2024, 1, 1, 14, 0)).unwrap();
        let c = DateTimeRange::new(at(2024, 1, 1, 12, 0), at(2024, 1, 1, 14, 0)).unwrap();

        let common = a.intersection(&b).unwrap();
        assert_eq!(common.start(), at(2024, 1, 1, 11, 0));
        assert_eq!(common.end(), at(2024, 1, 1, 12, 0));
        assert!(a.intersection(&c).is_none());
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_date_time_range_spanning_orders_bounds() {
        let range = DateTimeRange::spanning(at(2024, 1, 2, 0, 0), at(2024, 1, 1, 0, 0));
        assert_eq!(range.start(), at(2024, 1, 1, 0, 0));
        assert_eq!(range.duration_minutes(), 1440.0);
    }

    #[test]
    fn test_date_time_range_day() {
        let range = DateTimeRange::day(NaiveDate::from_ymd_opt(2024, 2, 28).unwrap());
        assert_eq!(range.start(), at(2024, 2, 28, 0, 0));
        assert_eq!(range.end(), at(2024, 2, 29, 0, 0));
        assert!(range.contains(at(2024, 2, 28, 23, 59)));
        assert!(!range.contains(at(2024, 2, 29, 0, 0)));
    }

    #[cfg(feature = "serde")]
    mod serde_tests {
        use super::*;

        #[test]
        fn test_time_range_serde_as_string() {
            let range = TimeRange::new(hm(8, 0), hm(12, 0));
            let json = serde_json::to_string(&range).unwrap();
            assert_eq!(json, "\"08:00-12:00\"");

            let parsed: TimeRange = serde_json::from_str(&json).unwrap();
            assert_eq!(parsed, range);
        }
    }
}
