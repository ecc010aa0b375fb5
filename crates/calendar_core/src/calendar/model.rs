//! The working-time calendar.

use super::day_type::DayType;
use super::exception::CalendarException;
use super::hours::WorkingHours;
use crate::types::{ConfigurationError, TimeRange};
use crate::units::CalendarProperties;
use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use std::sync::Arc;
use tracing::debug;

/// Hours of a `Default` weekday when no base calendar is set.
static DEFAULT_WORKING_RANGES: [TimeRange; 2] = [
    TimeRange::from_offsets(480, 720),
    TimeRange::from_offsets(780, 1020),
];

/// Every weekday, Monday first.
pub(crate) const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

#[inline]
fn day_index(weekday: Weekday) -> usize {
    weekday.num_days_from_monday() as usize
}

fn default_weekday_ranges(weekday: Weekday) -> &'static [TimeRange] {
    match weekday {
        Weekday::Sat | Weekday::Sun => &[],
        _ => &DEFAULT_WORKING_RANGES,
    }
}

/// A weekly working pattern with date-range exceptions.
///
/// Each weekday has a [`DayType`] and, when working, an ordered set of
/// [`TimeRange`]s. [`CalendarException`]s override the weekly pattern for the
/// dates they cover. A calendar may derive from a base calendar: `Default`
/// weekdays, missing hours, exceptions and unit properties are then resolved
/// through the base when the query runs.
///
/// Mutation needs `&mut self`; once built, a calendar can be shared freely
/// (for example inside an `Arc`) and queried concurrently.
///
/// # Examples
///
/// ```
/// use calendar_core::calendar::{Calendar, DayType};
/// use chrono::{NaiveDate, NaiveTime, Weekday};
///
/// let mut calendar = Calendar::standard("Standard");
/// let saturday = NaiveDate::from_ymd_opt(2006, 3, 18).unwrap();
/// assert!(!calendar.is_working_day(saturday));
///
/// calendar
///     .add_exception(saturday, saturday)
///     .unwrap()
///     .add_range("08:00-12:00".parse().unwrap())
///     .unwrap();
/// assert!(calendar.is_working_day(saturday));
/// assert_eq!(
///     calendar.start_time(saturday),
///     NaiveTime::from_hms_opt(8, 0, 0)
/// );
/// assert_eq!(calendar.day_type(Weekday::Sat), DayType::NonWorking);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Calendar {
    name: String,
    base: Option<Arc<Calendar>>,
    day_types: [DayType; 7],
    hours: [WorkingHours; 7],
    exceptions: Vec<CalendarException>,
    properties: Option<CalendarProperties>,
}

impl Calendar {
    /// Creates a calendar whose weekdays are all `Default`.
    ///
    /// Without a base calendar this behaves like [`Calendar::standard`].
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Creates a calendar working Monday to Friday, 08:00-12:00 and
    /// 13:00-17:00, with explicit day types and hours.
    pub fn standard(name: impl Into<String>) -> Self {
        let mut calendar = Self::new(name);
        for weekday in WEEKDAYS {
            match weekday {
                Weekday::Sat | Weekday::Sun => {
                    calendar.set_day_type(weekday, DayType::NonWorking);
                }
                _ => {
                    calendar.set_day_type(weekday, DayType::Working);
                    calendar.hours[day_index(weekday)] =
                        WorkingHours(DEFAULT_WORKING_RANGES.to_vec());
                }
            }
        }
        calendar
    }

    /// Creates a calendar deriving from `base`, with every weekday `Default`.
    pub fn derived(name: impl Into<String>, base: Arc<Calendar>) -> Self {
        Self {
            name: name.into(),
            base: Some(base),
            ..Self::default()
        }
    }

    /// The calendar's name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The base calendar, if any.
    pub fn base(&self) -> Option<&Arc<Calendar>> {
        self.base.as_ref()
    }

    /// Makes this calendar derive from `base`.
    ///
    /// Calendars are identified by name, so names must be unique along a
    /// base chain. An `Arc` chain cannot loop on its own, but definitions
    /// that refer to their base by name (configuration files, exports)
    /// would, so a repeated name is rejected even when the calendars are
    /// distinct values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::CyclicBase` when `base` or any of its own
    /// bases carries this calendar's name.
    pub fn set_base(&mut self, base: Arc<Calendar>) -> Result<(), ConfigurationError> {
        if base.lineage().any(|c| c.name == self.name) {
            debug!(calendar = %self.name, base = %base.name, "rejected cyclic base calendar");
            return Err(ConfigurationError::CyclicBase {
                calendar: self.name.clone(),
                base: base.name.clone(),
            });
        }
        self.base = Some(base);
        Ok(())
    }

    /// Detaches the base calendar.
    pub fn clear_base(&mut self) {
        self.base = None;
    }

    /// This calendar followed by its base chain.
    pub fn lineage(&self) -> impl Iterator<Item = &Calendar> {
        std::iter::successors(Some(self), |c| c.base.as_deref())
    }

    /// Sets how `weekday` is treated.
    pub fn set_day_type(&mut self, weekday: Weekday, day_type: DayType) -> &mut Self {
        self.day_types[day_index(weekday)] = day_type;
        self
    }

    /// The day type configured for `weekday` on this calendar.
    #[inline]
    pub fn day_type(&self, weekday: Weekday) -> DayType {
        self.day_types[day_index(weekday)]
    }

    /// The hours configured on this calendar for `weekday`.
    #[inline]
    pub fn hours(&self, weekday: Weekday) -> &WorkingHours {
        &self.hours[day_index(weekday)]
    }

    /// Mutable hours for `weekday`; additions are overlap-checked.
    #[inline]
    pub fn hours_mut(&mut self, weekday: Weekday) -> &mut WorkingHours {
        &mut self.hours[day_index(weekday)]
    }

    /// Marks `weekday` working and adds `range` to its hours.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::OverlappingRanges` on overlap.
    pub fn add_hours(
        &mut self,
        weekday: Weekday,
        range: TimeRange,
    ) -> Result<&mut Self, ConfigurationError> {
        self.hours_mut(weekday).add(range)?;
        self.set_day_type(weekday, DayType::Working);
        Ok(self)
    }

    /// Adds a non-working exception for `from..=to` and returns it for
    /// further configuration.
    ///
    /// # Errors
    ///
    /// - `ConfigurationError::InvalidExceptionRange` if `from > to`
    /// - `ConfigurationError::OverlappingExceptions` if any covered date is
    ///   already covered by another exception of this calendar
    pub fn add_exception(
        &mut self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<&mut CalendarException, ConfigurationError> {
        let exception = CalendarException::new(from, to)?;
        let index = self.exceptions.partition_point(|e| e.from() < from);
        let mut neighbours = index
            .checked_sub(1)
            .and_then(|i| self.exceptions.get(i))
            .into_iter()
            .chain(self.exceptions.get(index));
        if let Some(existing) = neighbours.find(|e| e.overlaps(&exception)) {
            return Err(ConfigurationError::OverlappingExceptions {
                from,
                to,
                existing_from: existing.from(),
                existing_to: existing.to(),
            });
        }
        self.exceptions.insert(index, exception);
        Ok(&mut self.exceptions[index])
    }

    /// Removes the exception starting on `from`, returning it.
    pub fn remove_exception(&mut self, from: NaiveDate) -> Option<CalendarException> {
        let index = self.exceptions.iter().position(|e| e.from() == from)?;
        Some(self.exceptions.remove(index))
    }

    /// Exceptions defined on this calendar, sorted by first date.
    #[inline]
    pub fn exceptions(&self) -> &[CalendarException] {
        &self.exceptions
    }

    /// The exception governing `date`: this calendar's own, else the
    /// nearest base calendar's.
    pub fn exception_for(&self, date: NaiveDate) -> Option<&CalendarException> {
        self.lineage().find_map(|c| c.own_exception_for(date))
    }

    fn own_exception_for(&self, date: NaiveDate) -> Option<&CalendarException> {
        let index = self.exceptions.partition_point(|e| e.to() < date);
        self.exceptions.get(index).filter(|e| e.contains(date))
    }

    /// Earliest and latest dates covered by any exception in the lineage.
    pub(crate) fn exception_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.lineage()
            .flat_map(|c| c.exceptions.first().zip(c.exceptions.last()))
            .map(|(first, last)| (first.from(), last.to()))
            .reduce(|(lo, hi), (from, to)| (lo.min(from), hi.max(to)))
    }

    /// Unit conventions: this calendar's, else the nearest base's, else
    /// the defaults.
    pub fn properties(&self) -> CalendarProperties {
        self.lineage()
            .find_map(|c| c.properties)
            .unwrap_or_default()
    }

    /// Overrides the unit conventions for this calendar.
    pub fn set_properties(&mut self, properties: CalendarProperties) -> &mut Self {
        self.properties = Some(properties);
        self
    }

    /// The weekly-pattern ranges for `weekday`, ignoring exceptions.
    pub fn weekday_ranges(&self, weekday: Weekday) -> &[TimeRange] {
        let index = day_index(weekday);
        match (self.day_types[index], self.base.as_deref()) {
            (DayType::NonWorking, _) => &[],
            (DayType::Working, Some(base)) if self.hours[index].is_empty() => {
                base.weekday_ranges(weekday)
            }
            (DayType::Working, _) => self.hours[index].ranges(),
            (DayType::Default, Some(base)) => base.weekday_ranges(weekday),
            (DayType::Default, None) => default_weekday_ranges(weekday),
        }
    }

    /// The resolved working ranges of `date`: a covering exception if any,
    /// otherwise the weekly pattern.
    pub fn working_ranges(&self, date: NaiveDate) -> &[TimeRange] {
        match self.exception_for(date) {
            Some(exception) => exception.ranges(),
            None => self.weekday_ranges(date.weekday()),
        }
    }

    /// Whether `date` has any working time of its own.
    #[inline]
    pub fn is_working_day(&self, date: NaiveDate) -> bool {
        !self.working_ranges(date).is_empty()
    }

    /// Start of the first working range of `date`.
    pub fn start_time(&self, date: NaiveDate) -> Option<NaiveTime> {
        self.working_ranges(date).first().map(TimeRange::start_time)
    }

    /// End of the last working range of `date`; midnight reports `00:00`.
    pub fn finish_time(&self, date: NaiveDate) -> Option<NaiveTime> {
        self.working_ranges(date).last().map(TimeRange::end_time)
    }

    /// Working minutes of `date`'s own ranges.
    pub fn working_minutes(&self, date: NaiveDate) -> i64 {
        self.working_ranges(date)
            .iter()
            .map(TimeRange::duration_minutes)
            .sum()
    }

    /// Working minutes of the weekly pattern for `weekday`.
    pub fn weekday_working_minutes(&self, weekday: Weekday) -> i64 {
        self.weekday_ranges(weekday)
            .iter()
            .map(TimeRange::duration_minutes)
            .sum()
    }

    /// Whether any weekday of the weekly pattern has working time.
    pub fn has_weekly_working_time(&self) -> bool {
        WEEKDAYS
            .iter()
            .any(|&weekday| !self.weekday_ranges(weekday).is_empty())
    }
}
