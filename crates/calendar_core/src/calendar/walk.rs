//! Day-by-day traversal of absolute working spans.

use super::model::Calendar;
use crate::types::{CalendarError, DateTimeRange, Direction};
use chrono::{NaiveDate, NaiveDateTime};
use tracing::debug;

impl Calendar {
    /// Working time inside `window` as sorted, disjoint intervals.
    ///
    /// Ranges of consecutive days that touch or overlap (for example a shift
    /// ending at midnight followed by one starting at midnight) come back as
    /// a single interval. Ranges of the day before the window are included
    /// so that spans continuing past midnight are not lost.
    pub fn working_spans(&self, window: DateTimeRange) -> Vec<DateTimeRange> {
        if window.is_empty() {
            return Vec::new();
        }
        let first = window.start().date();
        let first = first.pred_opt().unwrap_or(first);
        let last = window.end().date();

        let mut merged: Vec<DateTimeRange> = Vec::new();
        for date in first.iter_days().take_while(|d| *d <= last) {
            for range in self.working_ranges(date) {
                let span = range.on(date);
                match merged.last_mut() {
                    Some(previous) if span.start() <= previous.end() => {
                        if span.end() > previous.end() {
                            *previous = previous.with_end(span.end());
                        }
                    }
                    _ => merged.push(span),
                }
            }
        }
        merged
            .into_iter()
            .filter_map(|span| span.intersection(&window))
            .collect()
    }
}

/// Yields working spans one at a time moving away from an anchor.
///
/// Forward walks yield spans at or after the anchor in ascending order;
/// backward walks yield spans at or before it in descending order. The walk
/// ends with `CalendarError::NoWorkingTime` once it has passed every
/// exception in the calendar's lineage and the weekly pattern has no working
/// time at all, which is the only way it could otherwise run forever.
pub(crate) struct SpanWalk<'a> {
    calendar: &'a Calendar,
    anchor: NaiveDateTime,
    direction: Direction,
    next_day: Option<NaiveDate>,
    pending: Vec<DateTimeRange>,
    has_weekly_time: bool,
    exception_bounds: Option<(NaiveDate, NaiveDate)>,
}

impl<'a> SpanWalk<'a> {
    pub(crate) fn new(calendar: &'a Calendar, anchor: NaiveDateTime, direction: Direction) -> Self {
        Self {
            calendar,
            anchor,
            direction,
            next_day: Some(anchor.date()),
            pending: Vec::new(),
            has_weekly_time: calendar.has_weekly_working_time(),
            exception_bounds: calendar.exception_bounds(),
        }
    }

    /// The next span in walk direction, clipped to the anchor.
    pub(crate) fn next_span(&mut self) -> Result<DateTimeRange, CalendarError> {
        loop {
            if let Some(span) = self.pending.pop() {
                return Ok(span);
            }
            let Some(day) = self.next_day else {
                return Err(self.exhausted());
            };
            self.pending = self.day_spans(day);
            if self.direction == Direction::Forward {
                self.pending.reverse();
            }
            self.next_day = self.step(day)?;
        }
    }

    fn day_spans(&self, day: NaiveDate) -> Vec<DateTimeRange> {
        let whole = DateTimeRange::day(day);
        let window = match self.direction {
            _ if !whole.contains(self.anchor) => whole,
            Direction::Forward => whole.with_start(self.anchor),
            Direction::Backward => whole.with_end(self.anchor),
        };
        self.calendar.working_spans(window)
    }

    fn step(&self, day: NaiveDate) -> Result<Option<NaiveDate>, CalendarError> {
        if !self.has_weekly_time {
            let beyond = match (self.direction, self.exception_bounds) {
                (_, None) => true,
                (Direction::Forward, Some((_, last))) => day > last,
                (Direction::Backward, Some((first, _))) => day < first,
            };
            if beyond {
                return Ok(None);
            }
        }
        let next = match self.direction {
            Direction::Forward => day.succ_opt(),
            Direction::Backward => day.pred_opt(),
        };
        next.map(Some).ok_or_else(|| CalendarError::DateOverflow {
            reason: format!("working-time walk ran past {day}"),
        })
    }

    fn exhausted(&self) -> CalendarError {
        debug!(
            calendar = %self.calendar.name(),
            anchor = %self.anchor,
            direction = ?self.direction,
            "no reachable working time"
        );
        CalendarError::NoWorkingTime {
            calendar: self.calendar.name().to_string(),
            anchor: self.anchor,
            direction: self.direction,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::DayType;
    use chrono::Weekday;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, 0)
            .unwrap()
    }

    fn night_shift() -> Calendar {
        let mut calendar = Calendar::new("Night");
        for weekday in crate::calendar::model::WEEKDAYS {
            calendar
                .add_hours(weekday, "00:00-04:30".parse().unwrap())
                .unwrap();
            calendar
                .add_hours(weekday, "08:30-00:00".parse().unwrap())
                .unwrap();
        }
        calendar
    }

    #[test]
    fn test_working_spans_merge_across_midnight() {
        let calendar = night_shift();
        let window = DateTimeRange::new(at(2024, 2, 28, 0, 0), at(2024, 3, 1, 0, 0)).unwrap();
        let spans = calendar.working_spans(window);
        assert_eq!(spans.len(), 3);
        assert_eq!(spans[0].start(), at(2024, 2, 28, 0, 0));
        assert_eq!(spans[0].end(), at(2024, 2, 28, 4, 30));
        assert_eq!(spans[1].start(), at(2024, 2, 28, 8, 30));
        assert_eq!(spans[1].end(), at(2024, 2, 29, 4, 30));
        assert_eq!(spans[2].start(), at(2024, 2, 29, 8, 30));
        assert_eq!(spans[2].end(), at(2024, 3, 1, 0, 0));
    }

    #[test]
    fn test_working_spans_include_spill_from_previous_day() {
        let mut calendar = Calendar::new("Late");
        calendar.set_day_type(Weekday::Tue, DayType::NonWorking);
        calendar
            .add_hours(Weekday::Mon, "22:00-06:00".parse().unwrap())
            .unwrap();
        // 2024-03-05 is a Tuesday
        let spans = calendar.working_spans(DateTimeRange::day(
            NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
        ));
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].start(), at(2024, 3, 5, 0, 0));
        assert_eq!(spans[0].end(), at(2024, 3, 5, 6, 0));
    }

    #[test]
    fn test_empty_window_has_no_spans() {
        let calendar = Calendar::standard("Standard");
        let instant = at(2024, 3, 4, 9, 0);
        let window = DateTimeRange::new(instant, instant).unwrap();
        assert!(calendar.working_spans(window).is_empty());
    }

    #[test]
    fn test_walk_forward_and_backward_order() {
        let calendar = Calendar::standard("Standard");
        let anchor = at(2003, 10, 9, 10, 0);

        let mut forward = SpanWalk::new(&calendar, anchor, Direction::Forward);
        let first = forward.next_span().unwrap();
        assert_eq!(first.start(), anchor);
        assert_eq!(first.end(), at(2003, 10, 9, 12, 0));
        assert_eq!(forward.next_span().unwrap().start(), at(2003, 10, 9, 13, 0));

        let mut backward = SpanWalk::new(&calendar, anchor, Direction::Backward);
        let last = backward.next_span().unwrap();
        assert_eq!(last.start(), at(2003, 10, 9, 8, 0));
        assert_eq!(last.end(), anchor);
        assert_eq!(backward.next_span().unwrap().end(), at(2003, 10, 8, 17, 0));
    }

    #[test]
    fn test_walk_without_working_time_terminates() {
        let mut calendar = Calendar::new("Idle");
        for weekday in crate::calendar::model::WEEKDAYS {
            calendar.set_day_type(weekday, DayType::NonWorking);
        }
        calendar
            .add_exception(
                NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            )
            .unwrap()
            .add_range("08:00-12:00".parse().unwrap())
            .unwrap();

        let mut forward = SpanWalk::new(&calendar, at(2024, 1, 1, 0, 0), Direction::Forward);
        assert_eq!(forward.next_span().unwrap().start(), at(2024, 6, 1, 8, 0));
        assert!(matches!(
            forward.next_span(),
            Err(CalendarError::NoWorkingTime {
                direction: Direction::Forward,
                ..
            })
        ));

        let mut backward = SpanWalk::new(&calendar, at(2024, 5, 31, 0, 0), Direction::Backward);
        assert!(matches!(
            backward.next_span(),
            Err(CalendarError::NoWorkingTime { .. })
        ));
    }
}
