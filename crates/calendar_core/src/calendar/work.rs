//! Working-time measurement and date arithmetic.
//!
//! All operations work on local wall-clock date-times. A span crossing a
//! daylight-saving change is measured by the minutes shown on the clock,
//! never by physical elapsed time.

use super::model::Calendar;
use super::walk::SpanWalk;
use crate::types::{CalendarError, DateTimeRange, Direction};
use crate::units::{Duration, TimeUnit};
use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use tracing::trace;

fn overflow(anchor: NaiveDateTime, duration: Duration) -> CalendarError {
    CalendarError::DateOverflow {
        reason: format!("{anchor} moved by {duration}"),
    }
}

impl Calendar {
    /// Working time between two instants, signed by direction.
    ///
    /// Returns a negative duration when `end` precedes `start`. Working
    /// units count only the calendar's working minutes and are converted
    /// with the calendar's [`properties`](Calendar::properties); elapsed
    /// units count raw wall-clock time.
    ///
    /// # Examples
    ///
    /// ```
    /// use calendar_core::calendar::Calendar;
    /// use calendar_core::units::TimeUnit;
    /// use chrono::NaiveDate;
    ///
    /// let calendar = Calendar::standard("Standard");
    /// let day = NaiveDate::from_ymd_opt(2006, 3, 14).unwrap();
    /// let start = day.and_hms_opt(8, 0, 0).unwrap();
    /// let end = day.and_hms_opt(12, 0, 0).unwrap();
    ///
    /// assert_eq!(calendar.work_between(start, end, TimeUnit::Days).amount(), 0.5);
    /// assert_eq!(calendar.work_between(end, start, TimeUnit::Hours).amount(), -4.0);
    /// ```
    pub fn work_between(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
        units: TimeUnit,
    ) -> Duration {
        if start == end {
            return Duration::zero(units);
        }
        let window = DateTimeRange::spanning(start, end);
        let minutes = if units.is_elapsed() {
            window.duration_minutes()
        } else {
            self.working_spans(window)
                .iter()
                .map(DateTimeRange::duration_minutes)
                .sum()
        };
        let sign = if end < start { -1.0 } else { 1.0 };
        Duration::minutes(sign * minutes).convert_units(units, &self.properties())
    }

    /// The instant reached by adding `duration` of working time to `anchor`.
    ///
    /// A negative duration walks backwards. An anchor outside working time
    /// first moves to the start of the next working span (forwards) or the
    /// end of the previous one (backwards) without consuming anything. When
    /// the duration runs out exactly at the end of a span the result is that
    /// boundary, not the start of the next span; spans that meet at midnight
    /// count as one continuous span. Elapsed durations are added as raw
    /// wall-clock time, and a zero duration returns `anchor` unchanged.
    ///
    /// # Errors
    ///
    /// - `CalendarError::NoWorkingTime` if the calendar has no working time
    ///   left in the walk direction
    /// - `CalendarError::DateOverflow` if the walk leaves chrono's date range
    ///
    /// # Examples
    ///
    /// ```
    /// use calendar_core::calendar::Calendar;
    /// use calendar_core::units::Duration;
    /// use chrono::NaiveDate;
    ///
    /// let calendar = Calendar::standard("Standard");
    /// let thursday = NaiveDate::from_ymd_opt(2003, 10, 9).unwrap();
    /// let anchor = thursday.and_hms_opt(8, 0, 0).unwrap();
    ///
    /// // Thursday and Friday, then Monday after the weekend
    /// let monday = NaiveDate::from_ymd_opt(2003, 10, 13).unwrap();
    /// assert_eq!(
    ///     calendar.advance(anchor, Duration::hours(24.0)).unwrap(),
    ///     monday.and_hms_opt(17, 0, 0).unwrap()
    /// );
    /// ```
    pub fn advance(
        &self,
        anchor: NaiveDateTime,
        duration: Duration,
    ) -> Result<NaiveDateTime, CalendarError> {
        let props = self.properties();
        let millis = (duration.to_minutes(&props) * 60_000.0).round();
        trace!(calendar = %self.name(), %anchor, %duration, "advance");

        if !millis.is_finite() || millis.abs() >= i64::MAX as f64 {
            return Err(overflow(anchor, duration));
        }
        let delta =
            TimeDelta::try_milliseconds(millis as i64).ok_or_else(|| overflow(anchor, duration))?;
        if delta.is_zero() {
            return Ok(anchor);
        }
        if duration.units().is_elapsed() {
            return anchor
                .checked_add_signed(delta)
                .ok_or_else(|| overflow(anchor, duration));
        }

        let (direction, room) = if delta > TimeDelta::zero() {
            (Direction::Forward, NaiveDateTime::MAX.signed_duration_since(anchor))
        } else {
            (Direction::Backward, anchor.signed_duration_since(NaiveDateTime::MIN))
        };
        let mut remaining = delta.abs();
        // working time never outruns the clock
        if remaining > room {
            return Err(overflow(anchor, duration));
        }
        let mut walk = SpanWalk::new(self, anchor, direction);
        loop {
            let span = walk.next_span()?;
            let available = span.duration();
            if remaining <= available {
                let result = match direction {
                    Direction::Forward => span.start().checked_add_signed(remaining),
                    Direction::Backward => span.end().checked_sub_signed(remaining),
                };
                return result.ok_or_else(|| overflow(anchor, duration));
            }
            remaining = remaining - available;
        }
    }

    /// `instant` itself when it lies in working time, otherwise the start
    /// of the next working span.
    ///
    /// # Errors
    ///
    /// Returns `CalendarError::NoWorkingTime` if no working time follows.
    pub fn next_work_start(&self, instant: NaiveDateTime) -> Result<NaiveDateTime, CalendarError> {
        SpanWalk::new(self, instant, Direction::Forward)
            .next_span()
            .map(|span| span.start())
    }

    /// `instant` itself when working time ends at or runs through it,
    /// otherwise the end of the previous working span.
    ///
    /// # Errors
    ///
    /// Returns `CalendarError::NoWorkingTime` if no working time precedes.
    pub fn previous_work_finish(
        &self,
        instant: NaiveDateTime,
    ) -> Result<NaiveDateTime, CalendarError> {
        SpanWalk::new(self, instant, Direction::Backward)
            .next_span()
            .map(|span| span.end())
    }

    /// Whether `instant` falls inside working time.
    ///
    /// The last representable minute never counts as working time.
    pub fn is_working_instant(&self, instant: NaiveDateTime) -> bool {
        let Some(next) = instant.checked_add_signed(TimeDelta::minutes(1)) else {
            return false;
        };
        self.working_spans(DateTimeRange::spanning(instant, next))
            .first()
            .is_some_and(|span| span.start() == instant)
    }

    /// Number of working dates in `start..=end`, negative when `end`
    /// precedes `start`.
    ///
    /// # Examples
    ///
    /// ```
    /// use calendar_core::calendar::Calendar;
    /// use chrono::NaiveDate;
    ///
    /// let calendar = Calendar::standard("Standard");
    /// let monday = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
    /// let sunday = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
    /// assert_eq!(calendar.working_days_between(monday, sunday), 5);
    /// assert_eq!(calendar.working_days_between(sunday, monday), -5);
    /// ```
    pub fn working_days_between(&self, start: NaiveDate, end: NaiveDate) -> i64 {
        let (lo, hi, sign) = if start <= end {
            (start, end, 1)
        } else {
            (end, start, -1)
        };
        let count = lo
            .iter_days()
            .take_while(|d| *d <= hi)
            .filter(|d| self.is_working_day(*d))
            .count() as i64;
        sign * count
    }
}
