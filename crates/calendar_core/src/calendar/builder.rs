//! Fluent construction of calendars.

use super::day_type::DayType;
use super::model::Calendar;
use crate::types::{CalendarError, TimeRange};
use crate::units::CalendarProperties;
use chrono::{NaiveDate, Weekday};
use std::sync::Arc;

#[derive(Debug, Clone)]
struct PendingException {
    name: Option<String>,
    from: NaiveDate,
    to: NaiveDate,
    ranges: Vec<TimeRange>,
}

/// Builder collecting a calendar definition and validating it in one go.
///
/// Weekdays given hours become `Working` unless a day type is set for them
/// explicitly.
///
/// # Examples
///
/// ```
/// use calendar_core::calendar::{CalendarBuilder, DayType};
/// use chrono::{NaiveDate, Weekday};
///
/// let christmas = NaiveDate::from_ymd_opt(2024, 12, 25).unwrap();
/// let calendar = CalendarBuilder::new("Plant")
///     .hours(Weekday::Sat, "06:00-14:00".parse().unwrap())
///     .day_type(Weekday::Sun, DayType::NonWorking)
///     .holiday("Christmas", christmas, christmas)
///     .build()
///     .unwrap();
///
/// assert!(calendar.is_working_day(NaiveDate::from_ymd_opt(2024, 12, 28).unwrap()));
/// assert!(!calendar.is_working_day(christmas));
/// ```
#[derive(Debug, Clone)]
pub struct CalendarBuilder {
    name: String,
    base: Option<Arc<Calendar>>,
    day_types: Vec<(Weekday, DayType)>,
    hours: Vec<(Weekday, TimeRange)>,
    exceptions: Vec<PendingException>,
    properties: Option<CalendarProperties>,
}

impl CalendarBuilder {
    /// Starts a calendar called `name` with every weekday `Default`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base: None,
            day_types: Vec::new(),
            hours: Vec::new(),
            exceptions: Vec::new(),
            properties: None,
        }
    }

    /// Derives from `base`.
    pub fn base(mut self, base: Arc<Calendar>) -> Self {
        self.base = Some(base);
        self
    }

    /// Sets the day type of `weekday`.
    pub fn day_type(mut self, weekday: Weekday, day_type: DayType) -> Self {
        self.day_types.push((weekday, day_type));
        self
    }

    /// Adds a working range to `weekday`.
    pub fn hours(mut self, weekday: Weekday, range: TimeRange) -> Self {
        self.hours.push((weekday, range));
        self
    }

    /// Adds a non-working exception.
    pub fn non_working(mut self, from: NaiveDate, to: NaiveDate) -> Self {
        self.exceptions.push(PendingException {
            name: None,
            from,
            to,
            ranges: Vec::new(),
        });
        self
    }

    /// Adds a named non-working exception.
    pub fn holiday(mut self, name: impl Into<String>, from: NaiveDate, to: NaiveDate) -> Self {
        self.exceptions.push(PendingException {
            name: Some(name.into()),
            from,
            to,
            ranges: Vec::new(),
        });
        self
    }

    /// Adds an exception replacing the hours of `from..=to` with `ranges`.
    pub fn working_exception<I>(mut self, from: NaiveDate, to: NaiveDate, ranges: I) -> Self
    where
        I: IntoIterator<Item = TimeRange>,
    {
        self.exceptions.push(PendingException {
            name: None,
            from,
            to,
            ranges: ranges.into_iter().collect(),
        });
        self
    }

    /// Overrides the unit conventions.
    pub fn properties(mut self, properties: CalendarProperties) -> Self {
        self.properties = Some(properties);
        self
    }

    /// Builds the calendar.
    ///
    /// # Errors
    ///
    /// Returns `CalendarError::Configuration` for overlapping hours,
    /// overlapping or reversed exceptions, or a cyclic base.
    pub fn build(self) -> Result<Calendar, CalendarError> {
        let mut calendar = Calendar::new(self.name);
        if let Some(base) = self.base {
            calendar.set_base(base)?;
        }
        for (weekday, range) in self.hours {
            calendar.add_hours(weekday, range)?;
        }
        for (weekday, day_type) in self.day_types {
            calendar.set_day_type(weekday, day_type);
        }
        for pending in self.exceptions {
            let exception = calendar.add_exception(pending.from, pending.to)?;
            if let Some(name) = pending.name {
                exception.set_name(name);
            }
            for range in pending.ranges {
                exception.add_range(range)?;
            }
        }
        if let Some(properties) = self.properties {
            calendar.set_properties(properties);
        }
        Ok(calendar)
    }
}
