//! Timescale granularity enumeration.

use std::fmt;
use std::str::FromStr;

/// Granularity of the ranges produced by a timescale.
///
/// # Examples
///
/// ```
/// use calendar_timephased::timescale::TimescaleUnit;
///
/// let unit: TimescaleUnit = "thirds-of-months".parse().unwrap();
/// assert_eq!(unit, TimescaleUnit::ThirdsOfMonths);
/// assert_eq!(TimescaleUnit::Quarters.months(), Some(3));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TimescaleUnit {
    /// One wall-clock minute.
    Minutes,
    /// One wall-clock hour.
    Hours,
    /// One calendar day.
    Days,
    /// Seven days from the configured week start.
    Weeks,
    /// The 1st-10th, 11th-20th and 21st-end of each month.
    ThirdsOfMonths,
    /// One calendar month.
    Months,
    /// Three months from January, April, July or October.
    Quarters,
    /// Six months from January or July.
    HalfYears,
    /// One calendar year.
    Years,
}

impl TimescaleUnit {
    /// All units, finest first.
    pub const ALL: [TimescaleUnit; 9] = [
        TimescaleUnit::Minutes,
        TimescaleUnit::Hours,
        TimescaleUnit::Days,
        TimescaleUnit::Weeks,
        TimescaleUnit::ThirdsOfMonths,
        TimescaleUnit::Months,
        TimescaleUnit::Quarters,
        TimescaleUnit::HalfYears,
        TimescaleUnit::Years,
    ];

    /// Whole months per range, for month-based units.
    #[inline]
    pub fn months(&self) -> Option<u32> {
        match self {
            TimescaleUnit::Months => Some(1),
            TimescaleUnit::Quarters => Some(3),
            TimescaleUnit::HalfYears => Some(6),
            TimescaleUnit::Years => Some(12),
            _ => None,
        }
    }

    /// Returns the standard name for this unit.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            TimescaleUnit::Minutes => "Minutes",
            TimescaleUnit::Hours => "Hours",
            TimescaleUnit::Days => "Days",
            TimescaleUnit::Weeks => "Weeks",
            TimescaleUnit::ThirdsOfMonths => "Thirds of Months",
            TimescaleUnit::Months => "Months",
            TimescaleUnit::Quarters => "Quarters",
            TimescaleUnit::HalfYears => "Half Years",
            TimescaleUnit::Years => "Years",
        }
    }
}

impl fmt::Display for TimescaleUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for TimescaleUnit {
    type Err = String;

    /// Parses a unit from string (case-insensitive, singular or plural).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', '_', ' '], "").as_str() {
            "minute" | "minutes" | "min" => Ok(TimescaleUnit::Minutes),
            "hour" | "hours" | "h" => Ok(TimescaleUnit::Hours),
            "day" | "days" | "d" => Ok(TimescaleUnit::Days),
            "week" | "weeks" | "w" => Ok(TimescaleUnit::Weeks),
            "third" | "thirds" | "thirdofmonth" | "thirdsofmonth" | "thirdsofmonths" => {
                Ok(TimescaleUnit::ThirdsOfMonths)
            }
            "month" | "months" | "mo" => Ok(TimescaleUnit::Months),
            "quarter" | "quarters" | "q" => Ok(TimescaleUnit::Quarters),
            "halfyear" | "halfyears" | "half" => Ok(TimescaleUnit::HalfYears),
            "year" | "years" | "y" => Ok(TimescaleUnit::Years),
            _ => Err(format!("Unknown timescale unit: {}", s)),
        }
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use super::TimescaleUnit;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    impl Serialize for TimescaleUnit {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.serialize_str(self.name())
        }
    }

    impl<'de> Deserialize<'de> for TimescaleUnit {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let s = String::deserialize(deserializer)?;
            s.parse().map_err(serde::de::Error::custom)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_months() {
        assert_eq!(TimescaleUnit::Months.months(), Some(1));
        assert_eq!(TimescaleUnit::HalfYears.months(), Some(6));
        assert_eq!(TimescaleUnit::Years.months(), Some(12));
        assert_eq!(TimescaleUnit::Weeks.months(), None);
        assert_eq!(TimescaleUnit::ThirdsOfMonths.months(), None);
    }

    #[test]
    fn test_from_str_round_trips_names() {
        for unit in TimescaleUnit::ALL {
            assert_eq!(unit.name().parse::<TimescaleUnit>().unwrap(), unit);
        }
        assert_eq!("Q".parse::<TimescaleUnit>().unwrap(), TimescaleUnit::Quarters);
        assert_eq!(
            "half_year".parse::<TimescaleUnit>().unwrap(),
            TimescaleUnit::HalfYears
        );
    }

    #[test]
    fn test_from_str_invalid() {
        assert!("fortnight".parse::<TimescaleUnit>().is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_uses_name() {
        let json = serde_json::to_string(&TimescaleUnit::ThirdsOfMonths).unwrap();
        assert_eq!(json, "\"Thirds of Months\"");
        let back: TimescaleUnit = serde_json::from_str("\"quarters\"").unwrap();
        assert_eq!(back, TimescaleUnit::Quarters);
    }
}
