//! Calendar-wide unit conventions.

use super::time_unit::TimeUnit;

const ELAPSED_MINUTES_PER_DAY: f64 = 1440.0;
const ELAPSED_MINUTES_PER_WEEK: f64 = ELAPSED_MINUTES_PER_DAY * 7.0;
const ELAPSED_MINUTES_PER_MONTH: f64 = ELAPSED_MINUTES_PER_DAY * 30.0;
const ELAPSED_MINUTES_PER_YEAR: f64 = ELAPSED_MINUTES_PER_WEEK * 52.0;

/// Fixed lengths used to translate working days, weeks, months and years
/// into minutes.
///
/// These are pure conventions: a working day is always `minutes_per_day`
/// long here, whatever hours a particular date actually has. A month is
/// `minutes_per_day * days_per_month` and a year is `minutes_per_week * 52`.
///
/// # Examples
///
/// ```
/// use calendar_core::units::{CalendarProperties, TimeUnit};
///
/// let props = CalendarProperties::default();
/// assert_eq!(props.minutes_per(TimeUnit::Days), 480.0);
/// assert_eq!(props.minutes_per(TimeUnit::Months), 9600.0);
/// assert_eq!(props.minutes_per(TimeUnit::Years), 124_800.0);
/// assert_eq!(props.minutes_per(TimeUnit::ElapsedDays), 1440.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CalendarProperties {
    /// Working minutes in one day.
    pub minutes_per_day: u32,
    /// Working minutes in one week.
    pub minutes_per_week: u32,
    /// Working days in one month.
    pub days_per_month: u32,
}

impl Default for CalendarProperties {
    fn default() -> Self {
        Self {
            minutes_per_day: 480,
            minutes_per_week: 2400,
            days_per_month: 20,
        }
    }
}

impl CalendarProperties {
    /// Creates properties from explicit values.
    pub fn new(minutes_per_day: u32, minutes_per_week: u32, days_per_month: u32) -> Self {
        Self {
            minutes_per_day,
            minutes_per_week,
            days_per_month,
        }
    }

    /// Sets working hours per day.
    ///
    /// Hours are rounded to whole minutes; negative or NaN hours give zero
    /// and values past `u32::MAX` minutes saturate.
    pub fn with_hours_per_day(mut self, hours: f64) -> Self {
        self.minutes_per_day = (hours * 60.0).round() as u32;
        self
    }

    /// Sets working hours per week, rounded like
    /// [`with_hours_per_day`](Self::with_hours_per_day).
    pub fn with_hours_per_week(mut self, hours: f64) -> Self {
        self.minutes_per_week = (hours * 60.0).round() as u32;
        self
    }

    /// Sets working days per month.
    pub fn with_days_per_month(mut self, days: u32) -> Self {
        self.days_per_month = days;
        self
    }

    /// Working minutes in one month.
    #[inline]
    pub fn minutes_per_month(&self) -> u64 {
        u64::from(self.minutes_per_day) * u64::from(self.days_per_month)
    }

    /// Working minutes in one year.
    #[inline]
    pub fn minutes_per_year(&self) -> u64 {
        u64::from(self.minutes_per_week) * 52
    }

    /// Minutes represented by one of `unit`.
    pub fn minutes_per(&self, unit: TimeUnit) -> f64 {
        match unit {
            TimeUnit::Minutes | TimeUnit::ElapsedMinutes => 1.0,
            TimeUnit::Hours | TimeUnit::ElapsedHours => 60.0,
            TimeUnit::Days => f64::from(self.minutes_per_day),
            TimeUnit::Weeks => f64::from(self.minutes_per_week),
            TimeUnit::Months => self.minutes_per_month() as f64,
            TimeUnit::Years => self.minutes_per_year() as f64,
            TimeUnit::ElapsedDays => ELAPSED_MINUTES_PER_DAY,
            TimeUnit::ElapsedWeeks => ELAPSED_MINUTES_PER_WEEK,
            TimeUnit::ElapsedMonths => ELAPSED_MINUTES_PER_MONTH,
            TimeUnit::ElapsedYears => ELAPSED_MINUTES_PER_YEAR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_hour_conventions() {
        let props = CalendarProperties::default();
        assert_eq!(props.minutes_per(TimeUnit::Days) / 60.0, 8.0);
        assert_eq!(props.minutes_per(TimeUnit::Weeks) / 60.0, 40.0);
        assert_eq!(props.minutes_per(TimeUnit::Months) / 60.0, 160.0);
        assert_eq!(props.minutes_per(TimeUnit::Years) / 60.0, 2080.0);
    }

    #[test]
    fn test_elapsed_conventions() {
        let props = CalendarProperties::default();
        assert_eq!(props.minutes_per(TimeUnit::ElapsedWeeks), 10_080.0);
        assert_eq!(props.minutes_per(TimeUnit::ElapsedMonths), 43_200.0);
        assert_eq!(props.minutes_per(TimeUnit::ElapsedYears), 524_160.0);
    }

    #[test]
    fn test_custom_properties() {
        let props = CalendarProperties::default()
            .with_hours_per_day(7.5)
            .with_hours_per_week(37.5)
            .with_days_per_month(21);
        assert_eq!(props.minutes_per_day, 450);
        assert_eq!(props.minutes_per_week, 2250);
        assert_eq!(props.minutes_per_month(), 9450);
        assert_eq!(props.minutes_per_year(), 117_000);
    }

    #[test]
    fn test_large_values_do_not_wrap() {
        let props = CalendarProperties::new(u32::MAX, u32::MAX, u32::MAX);
        let max = u64::from(u32::MAX);
        assert_eq!(props.minutes_per_month(), max * max);
        assert_eq!(props.minutes_per_year(), max * 52);
        assert_eq!(props.minutes_per(TimeUnit::Years), (max * 52) as f64);
    }

    #[test]
    fn test_out_of_range_hours_saturate() {
        let props = CalendarProperties::default()
            .with_hours_per_day(-1.0)
            .with_hours_per_week(1e12);
        assert_eq!(props.minutes_per_day, 0);
        assert_eq!(props.minutes_per_week, u32::MAX);
    }
}
