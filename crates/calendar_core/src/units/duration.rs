//! Signed durations in working or elapsed units.

use super::properties::CalendarProperties;
use super::time_unit::TimeUnit;
use std::fmt;
use std::ops::Neg;
use std::str::FromStr;

/// An amount of time in a given unit.
///
/// The amount is signed: `Calendar::work_between` returns a negative
/// duration when its end precedes its start, and `Calendar::advance` walks
/// backwards for negative durations.
///
/// # Examples
///
/// ```
/// use calendar_core::units::{CalendarProperties, Duration, TimeUnit};
///
/// let props = CalendarProperties::default();
/// let shift = Duration::new(16.0, TimeUnit::Hours);
/// assert_eq!(shift.convert_units(TimeUnit::Days, &props).amount(), 2.0);
///
/// let parsed: Duration = "-2.5d".parse().unwrap();
/// assert_eq!(parsed, Duration::new(-2.5, TimeUnit::Days));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Duration {
    amount: f64,
    units: TimeUnit,
}

impl Duration {
    /// Creates a duration.
    #[inline]
    pub fn new(amount: f64, units: TimeUnit) -> Self {
        Self { amount, units }
    }

    /// A zero-length duration in `units`.
    #[inline]
    pub fn zero(units: TimeUnit) -> Self {
        Self { amount: 0.0, units }
    }

    /// Shorthand for working minutes.
    #[inline]
    pub fn minutes(amount: f64) -> Self {
        Self::new(amount, TimeUnit::Minutes)
    }

    /// Shorthand for working hours.
    #[inline]
    pub fn hours(amount: f64) -> Self {
        Self::new(amount, TimeUnit::Hours)
    }

    /// Shorthand for working days.
    #[inline]
    pub fn days(amount: f64) -> Self {
        Self::new(amount, TimeUnit::Days)
    }

    /// The signed amount.
    #[inline]
    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// The unit of the amount.
    #[inline]
    pub fn units(&self) -> TimeUnit {
        self.units
    }

    /// Whether the amount is exactly zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.amount == 0.0
    }

    /// Whether the amount is negative.
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.amount < 0.0
    }

    /// The same duration with a non-negative amount.
    #[inline]
    pub fn abs(&self) -> Self {
        Self::new(self.amount.abs(), self.units)
    }

    /// Total minutes represented, using `props` for working days and longer.
    pub fn to_minutes(&self, props: &CalendarProperties) -> f64 {
        self.amount * props.minutes_per(self.units)
    }

    /// Re-expresses the duration in `target` units.
    ///
    /// Working and elapsed units convert through minutes. A target unit
    /// whose length is configured as zero yields a zero amount.
    pub fn convert_units(&self, target: TimeUnit, props: &CalendarProperties) -> Duration {
        if target == self.units {
            return *self;
        }
        let divisor = props.minutes_per(target);
        let amount = if divisor == 0.0 {
            0.0
        } else {
            self.to_minutes(props) / divisor
        };
        Duration::new(amount, target)
    }

    /// Sum of two durations expressed in this duration's units.
    pub fn plus(&self, other: Duration, props: &CalendarProperties) -> Duration {
        let other = other.convert_units(self.units, props);
        Duration::new(self.amount + other.amount, self.units)
    }
}

impl Neg for Duration {
    type Output = Duration;

    fn neg(self) -> Duration {
        Duration::new(-self.amount, self.units)
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.units.abbreviation())
    }
}

impl FromStr for Duration {
    type Err = String;

    /// Parses a signed number followed by a unit, e.g. `"8h"`, `"-2 days"`
    /// or `"1.5ed"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let split = trimmed
            .find(|c: char| c.is_alphabetic())
            .ok_or_else(|| format!("Missing unit in duration: {}", s))?;
        let (number, unit) = trimmed.split_at(split);
        let amount: f64 = number
            .trim()
            .parse()
            .map_err(|e| format!("Invalid amount in duration '{}': {}", s, e))?;
        let units: TimeUnit = unit.parse()?;
        Ok(Duration::new(amount, units))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_convert_hours_to_days() {
        let props = CalendarProperties::default();
        let d = Duration::hours(12.0).convert_units(TimeUnit::Days, &props);
        assert_relative_eq!(d.amount(), 1.5);
        assert_eq!(d.units(), TimeUnit::Days);
    }

    #[test]
    fn test_convert_months_and_years() {
        let props = CalendarProperties::default();
        let month = Duration::new(1.0, TimeUnit::Months);
        assert_relative_eq!(month.convert_units(TimeUnit::Hours, &props).amount(), 160.0);
        let year = Duration::new(1.0, TimeUnit::Years);
        assert_relative_eq!(year.convert_units(TimeUnit::Hours, &props).amount(), 2080.0);
        assert_relative_eq!(year.convert_units(TimeUnit::Weeks, &props).amount(), 52.0);
    }

    #[test]
    fn test_convert_elapsed() {
        let props = CalendarProperties::default();
        let d = Duration::new(2.0, TimeUnit::ElapsedDays);
        assert_relative_eq!(
            d.convert_units(TimeUnit::ElapsedHours, &props).amount(),
            48.0
        );
        assert_relative_eq!(d.convert_units(TimeUnit::Days, &props).amount(), 6.0);
    }

    #[test]
    fn test_convert_to_zero_length_unit() {
        let props = CalendarProperties::new(0, 2400, 20);
        let d = Duration::hours(8.0).convert_units(TimeUnit::Days, &props);
        assert_eq!(d.amount(), 0.0);
    }

    #[test]
    fn test_convert_same_unit_is_identity() {
        let props = CalendarProperties::default();
        let d = Duration::days(3.25);
        assert_eq!(d.convert_units(TimeUnit::Days, &props), d);
    }

    #[test]
    fn test_sign_helpers() {
        let d = -Duration::hours(4.0);
        assert!(d.is_negative());
        assert_eq!(d.abs(), Duration::hours(4.0));
        assert!(Duration::zero(TimeUnit::Days).is_zero());
    }

    #[test]
    fn test_plus_converts_other_operand() {
        let props = CalendarProperties::default();
        let total = Duration::days(1.0).plus(Duration::hours(4.0), &props);
        assert_relative_eq!(total.amount(), 1.5);
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!("8h".parse::<Duration>().unwrap(), Duration::hours(8.0));
        assert_eq!(
            " -2 days ".parse::<Duration>().unwrap(),
            Duration::days(-2.0)
        );
        assert_eq!(
            "1.5ed".parse::<Duration>().unwrap(),
            Duration::new(1.5, TimeUnit::ElapsedDays)
        );
        assert_eq!(Duration::hours(24.0).to_string(), "24h");
        assert_eq!(Duration::new(-0.5, TimeUnit::ElapsedWeeks).to_string(), "-0.5ew");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!("8".parse::<Duration>().is_err());
        assert!("h".parse::<Duration>().is_err());
        assert!("8 parsecs".parse::<Duration>().is_err());
    }
}
