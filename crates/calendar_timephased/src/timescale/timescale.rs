//! Timescale and TimescaleBuilder implementation.

use super::error::TimescaleError;
use super::unit::TimescaleUnit;
use calendar_core::types::{midnight, DateTimeRange};
use chrono::{Datelike, Days, Months, NaiveDate, NaiveDateTime, TimeDelta, Weekday};
use tracing::debug;

/// An ordered run of contiguous, non-overlapping, half-open ranges.
///
/// Produced by [`TimescaleBuilder`]; always holds at least one range.
///
/// # Examples
///
/// ```
/// use calendar_timephased::timescale::{TimescaleBuilder, TimescaleUnit};
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2023, 6, 22).unwrap().and_hms_opt(9, 0, 0).unwrap();
/// let timescale = TimescaleBuilder::new()
///     .start(start)
///     .unit(TimescaleUnit::Quarters)
///     .count(2)
///     .build()
///     .unwrap();
///
/// assert_eq!(timescale.len(), 2);
/// assert_eq!(timescale.start().date(), NaiveDate::from_ymd_opt(2023, 4, 1).unwrap());
/// assert_eq!(timescale.end().date(), NaiveDate::from_ymd_opt(2023, 10, 1).unwrap());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Timescale {
    unit: TimescaleUnit,
    ranges: Vec<DateTimeRange>,
}

impl Timescale {
    /// Returns the granularity of the ranges.
    #[inline]
    pub fn unit(&self) -> TimescaleUnit {
        self.unit
    }

    /// Returns the ranges in ascending order.
    #[inline]
    pub fn ranges(&self) -> &[DateTimeRange] {
        &self.ranges
    }

    /// Consumes the timescale, returning its ranges.
    pub fn into_ranges(self) -> Vec<DateTimeRange> {
        self.ranges
    }

    /// Returns the number of ranges.
    #[inline]
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    /// Returns whether the timescale is empty. Built timescales never are.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Start of the first range.
    #[inline]
    pub fn start(&self) -> NaiveDateTime {
        self.ranges[0].start()
    }

    /// End of the last range.
    #[inline]
    pub fn end(&self) -> NaiveDateTime {
        self.ranges[self.ranges.len() - 1].end()
    }

    /// Returns an iterator over the ranges.
    pub fn iter(&self) -> impl Iterator<Item = &DateTimeRange> {
        self.ranges.iter()
    }

    /// Returns the index of the range containing `instant`, if any.
    pub fn index_containing(&self, instant: NaiveDateTime) -> Option<usize> {
        let index = self.ranges.partition_point(|r| r.end() <= instant);
        self.ranges
            .get(index)
            .filter(|r| r.contains(instant))
            .map(|_| index)
    }

    /// Returns the range containing `instant`, if any.
    pub fn range_containing(&self, instant: NaiveDateTime) -> Option<&DateTimeRange> {
        self.index_containing(instant).map(|i| &self.ranges[i])
    }
}

/// Builder for constructing timescales.
///
/// The first range opens on the conventional boundary at or around
/// `start`: midnight of the start day for minutes, hours and days, the
/// first of the month for thirds and months, the first of the quarter,
/// half-year or year otherwise. Weeks open on the
/// [`week_start`](Self::week_start) day (Monday by default) of the
/// Monday-based week containing `start`.
#[derive(Debug, Clone)]
pub struct TimescaleBuilder {
    start: Option<NaiveDateTime>,
    unit: Option<TimescaleUnit>,
    count: Option<usize>,
    week_start: Weekday,
}

impl Default for TimescaleBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TimescaleBuilder {
    /// Creates a new builder with weeks starting on Monday.
    pub fn new() -> Self {
        Self {
            start: None,
            unit: None,
            count: None,
            week_start: Weekday::Mon,
        }
    }

    /// Sets the instant the first range is aligned from.
    pub fn start(mut self, start: NaiveDateTime) -> Self {
        self.start = Some(start);
        self
    }

    /// Sets the granularity.
    pub fn unit(mut self, unit: TimescaleUnit) -> Self {
        self.unit = Some(unit);
        self
    }

    /// Sets the number of ranges.
    pub fn count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }

    /// Sets the first day of the week.
    pub fn week_start(mut self, weekday: Weekday) -> Self {
        self.week_start = weekday;
        self
    }

    /// Builds the timescale.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Start, unit or count is missing
    /// - Count is zero
    /// - A range boundary falls outside the supported date range
    pub fn build(self) -> Result<Timescale, TimescaleError> {
        let start = self
            .start
            .ok_or(TimescaleError::MissingField { field: "start" })?;
        let unit = self
            .unit
            .ok_or(TimescaleError::MissingField { field: "unit" })?;
        let count = self
            .count
            .ok_or(TimescaleError::MissingField { field: "count" })?;
        if count == 0 {
            return Err(TimescaleError::ZeroCount);
        }

        let mut ranges = Vec::with_capacity(count);
        let mut current = self.align(start, unit)?;
        for _ in 0..count {
            let next = self.advance(current, unit)?;
            ranges.push(DateTimeRange::spanning(current, next));
            current = next;
        }
        debug!(%start, %unit, count, "generated timescale");
        Ok(Timescale { unit, ranges })
    }

    /// Start of the first range for `instant`.
    ///
    /// Minutes and hours count from midnight of the start day, thirds of a
    /// month from the first of the month. Weeks begin on the `week_start`
    /// day of the Monday-based week holding `instant`, so for a late week
    /// start the first range may open after `instant`.
    fn align(
        &self,
        instant: NaiveDateTime,
        unit: TimescaleUnit,
    ) -> Result<NaiveDateTime, TimescaleError> {
        let date = instant.date();
        let aligned = match unit {
            TimescaleUnit::Minutes | TimescaleUnit::Hours | TimescaleUnit::Days => {
                Some(midnight(date))
            }
            TimescaleUnit::Weeks => {
                let monday = date
                    .checked_sub_days(Days::new(u64::from(date.weekday().num_days_from_monday())));
                monday
                    .and_then(|d| {
                        d.checked_add_days(Days::new(u64::from(
                            self.week_start.num_days_from_monday(),
                        )))
                    })
                    .map(midnight)
            }
            TimescaleUnit::ThirdsOfMonths | TimescaleUnit::Months => {
                first_of(date, date.month())
            }
            TimescaleUnit::Quarters => first_of(date, (date.month0() / 3) * 3 + 1),
            TimescaleUnit::HalfYears => first_of(date, (date.month0() / 6) * 6 + 1),
            TimescaleUnit::Years => first_of(date, 1),
        };
        aligned.ok_or_else(|| TimescaleError::DateOverflow {
            reason: format!("cannot align {instant} to {unit}"),
        })
    }

    /// Start of the range following the one starting at `current`.
    fn advance(
        &self,
        current: NaiveDateTime,
        unit: TimescaleUnit,
    ) -> Result<NaiveDateTime, TimescaleError> {
        let next = match unit {
            TimescaleUnit::Minutes => current.checked_add_signed(TimeDelta::minutes(1)),
            TimescaleUnit::Hours => current.checked_add_signed(TimeDelta::hours(1)),
            TimescaleUnit::Days => current.checked_add_days(Days::new(1)),
            TimescaleUnit::Weeks => current.checked_add_days(Days::new(7)),
            TimescaleUnit::ThirdsOfMonths => match current.day() {
                1 => current.with_day(11),
                11 => current.with_day(21),
                _ => current
                    .with_day(1)
                    .and_then(|t| t.checked_add_months(Months::new(1))),
            },
            TimescaleUnit::Months
            | TimescaleUnit::Quarters
            | TimescaleUnit::HalfYears
            | TimescaleUnit::Years => {
                let months = unit.months().unwrap_or(1);
                current.checked_add_months(Months::new(months))
            }
        };
        next.ok_or_else(|| TimescaleError::DateOverflow {
            reason: format!("adding one {unit} range to {current} overflowed"),
        })
    }
}

fn first_of(date: NaiveDate, month: u32) -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(date.year(), month, 1).map(midnight)
}

/// Generates `count` contiguous ranges of `unit` aligned from `start`.
///
/// Weeks begin on Monday; use [`TimescaleBuilder`] for another week start.
///
/// # Examples
///
/// ```
/// use calendar_timephased::timescale::{make_timescale, TimescaleUnit};
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2023, 6, 22).unwrap().and_hms_opt(9, 0, 0).unwrap();
/// let thirds = make_timescale(start, TimescaleUnit::ThirdsOfMonths, 3).unwrap();
///
/// assert_eq!(thirds[0].start().date(), NaiveDate::from_ymd_opt(2023, 6, 1).unwrap());
/// assert_eq!(thirds[1].start().date(), NaiveDate::from_ymd_opt(2023, 6, 11).unwrap());
/// assert_eq!(thirds[2].start().date(), NaiveDate::from_ymd_opt(2023, 6, 21).unwrap());
/// ```
pub fn make_timescale(
    start: NaiveDateTime,
    unit: TimescaleUnit,
    count: usize,
) -> Result<Vec<DateTimeRange>, TimescaleError> {
    TimescaleBuilder::new()
        .start(start)
        .unit(unit)
        .count(count)
        .build()
        .map(Timescale::into_ranges)
}
