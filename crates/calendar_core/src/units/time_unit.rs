//! Duration unit enumeration.

use std::fmt;
use std::str::FromStr;

/// Unit in which a duration or rate is expressed.
///
/// Working units (`Minutes` to `Years`) measure working time and depend on
/// the calendar's [`CalendarProperties`](super::CalendarProperties) for the
/// larger units. Elapsed units measure raw wall-clock time and ignore
/// working time entirely.
///
/// # Examples
///
/// ```
/// use calendar_core::units::TimeUnit;
///
/// let unit: TimeUnit = "ed".parse().unwrap();
/// assert_eq!(unit, TimeUnit::ElapsedDays);
/// assert!(unit.is_elapsed());
/// assert_eq!(unit.working(), TimeUnit::Days);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeUnit {
    /// Working minutes.
    Minutes,
    /// Working hours.
    Hours,
    /// Working days.
    Days,
    /// Working weeks.
    Weeks,
    /// Working months.
    Months,
    /// Working years.
    Years,
    /// Wall-clock minutes.
    ElapsedMinutes,
    /// Wall-clock hours.
    ElapsedHours,
    /// Wall-clock days (24 hours).
    ElapsedDays,
    /// Wall-clock weeks (7 days).
    ElapsedWeeks,
    /// Wall-clock months (30 days).
    ElapsedMonths,
    /// Wall-clock years (52 weeks).
    ElapsedYears,
}

impl TimeUnit {
    /// All units, working units first.
    pub const ALL: [TimeUnit; 12] = [
        TimeUnit::Minutes,
        TimeUnit::Hours,
        TimeUnit::Days,
        TimeUnit::Weeks,
        TimeUnit::Months,
        TimeUnit::Years,
        TimeUnit::ElapsedMinutes,
        TimeUnit::ElapsedHours,
        TimeUnit::ElapsedDays,
        TimeUnit::ElapsedWeeks,
        TimeUnit::ElapsedMonths,
        TimeUnit::ElapsedYears,
    ];

    /// Whether the unit counts wall-clock time rather than working time.
    #[inline]
    pub fn is_elapsed(&self) -> bool {
        matches!(
            self,
            TimeUnit::ElapsedMinutes
                | TimeUnit::ElapsedHours
                | TimeUnit::ElapsedDays
                | TimeUnit::ElapsedWeeks
                | TimeUnit::ElapsedMonths
                | TimeUnit::ElapsedYears
        )
    }

    /// The working-time counterpart of this unit.
    pub fn working(&self) -> TimeUnit {
        match self {
            TimeUnit::ElapsedMinutes => TimeUnit::Minutes,
            TimeUnit::ElapsedHours => TimeUnit::Hours,
            TimeUnit::ElapsedDays => TimeUnit::Days,
            TimeUnit::ElapsedWeeks => TimeUnit::Weeks,
            TimeUnit::ElapsedMonths => TimeUnit::Months,
            TimeUnit::ElapsedYears => TimeUnit::Years,
            other => *other,
        }
    }

    /// The elapsed counterpart of this unit.
    pub fn elapsed(&self) -> TimeUnit {
        match self {
            TimeUnit::Minutes => TimeUnit::ElapsedMinutes,
            TimeUnit::Hours => TimeUnit::ElapsedHours,
            TimeUnit::Days => TimeUnit::ElapsedDays,
            TimeUnit::Weeks => TimeUnit::ElapsedWeeks,
            TimeUnit::Months => TimeUnit::ElapsedMonths,
            TimeUnit::Years => TimeUnit::ElapsedYears,
            other => *other,
        }
    }

    /// Short suffix used when formatting durations, e.g. `"h"` or `"ed"`.
    #[inline]
    pub fn abbreviation(&self) -> &'static str {
        match self {
            TimeUnit::Minutes => "m",
            TimeUnit::Hours => "h",
            TimeUnit::Days => "d",
            TimeUnit::Weeks => "w",
            TimeUnit::Months => "mo",
            TimeUnit::Years => "y",
            TimeUnit::ElapsedMinutes => "em",
            TimeUnit::ElapsedHours => "eh",
            TimeUnit::ElapsedDays => "ed",
            TimeUnit::ElapsedWeeks => "ew",
            TimeUnit::ElapsedMonths => "emo",
            TimeUnit::ElapsedYears => "ey",
        }
    }

    /// Human-readable name.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            TimeUnit::Minutes => "Minutes",
            TimeUnit::Hours => "Hours",
            TimeUnit::Days => "Days",
            TimeUnit::Weeks => "Weeks",
            TimeUnit::Months => "Months",
            TimeUnit::Years => "Years",
            TimeUnit::ElapsedMinutes => "Elapsed Minutes",
            TimeUnit::ElapsedHours => "Elapsed Hours",
            TimeUnit::ElapsedDays => "Elapsed Days",
            TimeUnit::ElapsedWeeks => "Elapsed Weeks",
            TimeUnit::ElapsedMonths => "Elapsed Months",
            TimeUnit::ElapsedYears => "Elapsed Years",
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for TimeUnit {
    type Err = String;

    /// Parses a unit name or abbreviation (case-insensitive).
    ///
    /// Supported formats:
    /// - Minutes: "m", "min", "minute", "minutes"
    /// - Hours: "h", "hr", "hour", "hours"
    /// - Days: "d", "day", "days"
    /// - Weeks: "w", "wk", "week", "weeks"
    /// - Months: "mo", "mon", "month", "months"
    /// - Years: "y", "yr", "year", "years"
    /// - Elapsed variants: "e" prefix or "elapsed" prefix, e.g. "ed", "elapsed days"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised = s.to_lowercase().replace(['-', '_', ' '], "");
        let (elapsed, base) = match normalised.strip_prefix("elapsed") {
            Some(rest) => (true, rest),
            None => match normalised.strip_prefix('e') {
                Some(rest) if !rest.is_empty() => (true, rest),
                _ => (false, normalised.as_str()),
            },
        };
        let unit = match base {
            "m" | "min" | "mins" | "minute" | "minutes" => TimeUnit::Minutes,
            "h" | "hr" | "hrs" | "hour" | "hours" => TimeUnit::Hours,
            "d" | "day" | "days" => TimeUnit::Days,
            "w" | "wk" | "wks" | "week" | "weeks" => TimeUnit::Weeks,
            "mo" | "mon" | "mons" | "month" | "months" => TimeUnit::Months,
            "y" | "yr" | "yrs" | "year" | "years" => TimeUnit::Years,
            _ => return Err(format!("Unknown time unit: {}", s)),
        };
        Ok(if elapsed { unit.elapsed() } else { unit })
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use super::TimeUnit;
    use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
    use std::str::FromStr;

    impl Serialize for TimeUnit {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            serializer.serialize_str(self.abbreviation())
        }
    }

    impl<'de> Deserialize<'de> for TimeUnit {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            let s = String::deserialize(deserializer)?;
            TimeUnit::from_str(&s).map_err(de::Error::custom)
        }
    }
}
