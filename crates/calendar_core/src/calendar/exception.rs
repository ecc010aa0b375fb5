//! Date-range overrides of the weekly pattern.

use super::hours::WorkingHours;
use crate::types::{ConfigurationError, TimeRange};
use chrono::NaiveDate;

/// An override covering an inclusive range of dates.
///
/// An exception with no ranges makes every covered date non-working; one
/// with ranges replaces the weekday hours on every covered date.
///
/// # Examples
///
/// ```
/// use calendar_core::calendar::CalendarException;
/// use chrono::NaiveDate;
///
/// let day = NaiveDate::from_ymd_opt(2006, 3, 18).unwrap();
/// let mut exception = CalendarException::new(day, day).unwrap();
/// assert!(!exception.is_working());
///
/// exception.add_range("08:00-12:00".parse().unwrap()).unwrap();
/// assert!(exception.is_working());
/// assert!(exception.contains(day));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CalendarException {
    name: Option<String>,
    from: NaiveDate,
    to: NaiveDate,
    hours: WorkingHours,
}

impl CalendarException {
    /// Creates a non-working exception for `from..=to`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::InvalidExceptionRange` if `from > to`.
    pub fn new(from: NaiveDate, to: NaiveDate) -> Result<Self, ConfigurationError> {
        if from > to {
            return Err(ConfigurationError::InvalidExceptionRange { from, to });
        }
        Ok(Self {
            name: None,
            from,
            to,
            hours: WorkingHours::new(),
        })
    }

    /// Optional label, e.g. a holiday name.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Sets the label.
    pub fn set_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.name = Some(name.into());
        self
    }

    /// First covered date.
    #[inline]
    pub fn from(&self) -> NaiveDate {
        self.from
    }

    /// Last covered date.
    #[inline]
    pub fn to(&self) -> NaiveDate {
        self.to
    }

    /// Adds a working range applied on every covered date.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::OverlappingRanges` on overlap.
    pub fn add_range(&mut self, range: TimeRange) -> Result<&mut Self, ConfigurationError> {
        self.hours.add(range)?;
        Ok(self)
    }

    /// The replacement ranges; empty for a non-working exception.
    #[inline]
    pub fn ranges(&self) -> &[TimeRange] {
        self.hours.ranges()
    }

    /// Mutable access to the replacement hours.
    pub fn hours_mut(&mut self) -> &mut WorkingHours {
        &mut self.hours
    }

    /// Whether covered dates carry any working time.
    #[inline]
    pub fn is_working(&self) -> bool {
        !self.hours.is_empty()
    }

    /// Whether `date` is covered.
    #[inline]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && date <= self.to
    }

    /// Whether the two exceptions cover a common date.
    #[inline]
    pub fn overlaps(&self, other: &CalendarException) -> bool {
        self.from <= other.to && other.from <= self.to
    }
}
