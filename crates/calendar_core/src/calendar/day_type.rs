//! Weekday classification.

use std::fmt;
use std::str::FromStr;

/// How a weekday is treated by a calendar.
///
/// # Examples
///
/// ```
/// use calendar_core::calendar::DayType;
///
/// assert_eq!("non-working".parse::<DayType>().unwrap(), DayType::NonWorking);
/// assert_eq!(DayType::Default.name(), "Default");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DayType {
    /// Working, with the calendar's own hours for the weekday.
    Working,
    /// No working time.
    NonWorking,
    /// Defers to the base calendar; without one, Monday to Friday work
    /// 08:00-12:00 and 13:00-17:00 and the weekend is non-working.
    #[default]
    Default,
}

impl DayType {
    /// Returns the standard name for this day type.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            DayType::Working => "Working",
            DayType::NonWorking => "Non-Working",
            DayType::Default => "Default",
        }
    }
}

impl fmt::Display for DayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for DayType {
    type Err = String;

    /// Parses day type from string (case-insensitive).
    ///
    /// Supported formats:
    /// - Working: "working", "work", "on"
    /// - NonWorking: "non-working", "nonworking", "off"
    /// - Default: "default", "inherit"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', '_', ' '], "").as_str() {
            "working" | "work" | "on" => Ok(DayType::Working),
            "nonworking" | "off" => Ok(DayType::NonWorking),
            "default" | "inherit" => Ok(DayType::Default),
            _ => Err(format!("Unknown day type: {}", s)),
        }
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use super::DayType;
    use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
    use std::str::FromStr;

    impl Serialize for DayType {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            serializer.serialize_str(self.name())
        }
    }

    impl<'de> Deserialize<'de> for DayType {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            let s = String::deserialize(deserializer)?;
            DayType::from_str(&s).map_err(de::Error::custom)
        }
    }
}
