//! Amount-per-time rates and their hourly normalisation.

use super::properties::CalendarProperties;
use super::time_unit::TimeUnit;
use std::fmt;

/// An amount per unit of time, e.g. 480 minutes of work per day or 50
/// currency units per hour.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rate {
    amount: f64,
    units: TimeUnit,
}

impl Rate {
    /// Creates a rate.
    #[inline]
    pub fn new(amount: f64, units: TimeUnit) -> Self {
        Self { amount, units }
    }

    /// Amount per unit.
    #[inline]
    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// The time unit the amount is spread over.
    #[inline]
    pub fn units(&self) -> TimeUnit {
        self.units
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.amount, self.units.abbreviation())
    }
}

/// Normalises `rate` to an amount per hour.
///
/// A day, week, month or year counts as its fixed conventional length from
/// `props`. A unit configured with zero length yields zero.
///
/// # Examples
///
/// ```
/// use calendar_core::units::{to_hourly, CalendarProperties, Rate, TimeUnit};
///
/// let props = CalendarProperties::default();
/// assert_eq!(to_hourly(&props, Rate::new(480.0, TimeUnit::Days)), 60.0);
/// assert_eq!(to_hourly(&props, Rate::new(2080.0, TimeUnit::Years)), 1.0);
/// ```
pub fn to_hourly(props: &CalendarProperties, rate: Rate) -> f64 {
    let minutes = props.minutes_per(rate.units());
    if minutes == 0.0 {
        0.0
    } else {
        rate.amount() * 60.0 / minutes
    }
}

/// Expresses an hourly amount as a rate per `target` unit.
///
/// # Examples
///
/// ```
/// use calendar_core::units::{from_hourly, CalendarProperties, TimeUnit};
///
/// let props = CalendarProperties::default();
/// let weekly = from_hourly(&props, 25.0, TimeUnit::Weeks);
/// assert_eq!(weekly.amount(), 1000.0);
/// ```
pub fn from_hourly(props: &CalendarProperties, hourly_rate: f64, target: TimeUnit) -> Rate {
    Rate::new(hourly_rate * props.minutes_per(target) / 60.0, target)
}
