//! Timephased work and cost items.

use super::error::SegmentError;
use calendar_core::calendar::Calendar;
use calendar_core::types::DateTimeRange;
use calendar_core::units::{CalendarProperties, Duration, TimeUnit};
use chrono::NaiveDateTime;

/// A span of an assignment carrying an amount spread at a fixed hourly density.
///
/// The segmenter only needs the span and the density; totals are kept by the
/// implementors for callers.
pub trait Timephased {
    /// Inclusive start of the span.
    fn start(&self) -> NaiveDateTime;

    /// Exclusive finish of the span.
    fn finish(&self) -> NaiveDateTime;

    /// Amount carried by one hour of working time inside the span.
    fn hourly_amount(&self, properties: &CalendarProperties) -> f64;

    /// The span as a range.
    fn span(&self) -> DateTimeRange {
        DateTimeRange::spanning(self.start(), self.finish())
    }
}

fn check_span(start: NaiveDateTime, finish: NaiveDateTime) -> Result<(), SegmentError> {
    if finish < start {
        return Err(SegmentError::Precondition {
            reason: format!("item finish {finish} precedes its start {start}"),
        });
    }
    Ok(())
}

/// Work allocated over a span.
///
/// `amount_per_hour` is the work performed in each working hour, so a full
/// time assignment carries `60m` per hour and a half time one `30m`.
///
/// # Examples
///
/// ```
/// use calendar_core::calendar::Calendar;
/// use calendar_core::units::Duration;
/// use calendar_timephased::timephased::TimephasedWork;
/// use chrono::NaiveDate;
///
/// let calendar = Calendar::standard("Standard");
/// let day = NaiveDate::from_ymd_opt(2026, 1, 28).unwrap();
/// let item = TimephasedWork::spread(
///     &calendar,
///     day.and_hms_opt(8, 0, 0).unwrap(),
///     day.and_hms_opt(17, 0, 0).unwrap(),
///     Duration::hours(4.0),
/// )
/// .unwrap();
///
/// assert_eq!(item.amount_per_hour().amount(), 30.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimephasedWork {
    start: NaiveDateTime,
    finish: NaiveDateTime,
    total_amount: Duration,
    amount_per_hour: Duration,
}

impl TimephasedWork {
    /// Creates a work item.
    ///
    /// # Errors
    ///
    /// Returns `SegmentError::Precondition` when `finish` precedes `start`.
    pub fn new(
        start: NaiveDateTime,
        finish: NaiveDateTime,
        total_amount: Duration,
        amount_per_hour: Duration,
    ) -> Result<Self, SegmentError> {
        check_span(start, finish)?;
        Ok(Self {
            start,
            finish,
            total_amount,
            amount_per_hour,
        })
    }

    /// Creates a work item spreading `total_amount` evenly over the working
    /// time of `calendar` between `start` and `finish`.
    ///
    /// A span without working time gets a zero density.
    ///
    /// # Errors
    ///
    /// Returns `SegmentError::Precondition` when `finish` precedes `start`.
    pub fn spread(
        calendar: &Calendar,
        start: NaiveDateTime,
        finish: NaiveDateTime,
        total_amount: Duration,
    ) -> Result<Self, SegmentError> {
        check_span(start, finish)?;
        let properties = calendar.properties();
        let working = calendar
            .work_between(start, finish, TimeUnit::Minutes)
            .amount();
        let per_hour = if working > 0.0 {
            total_amount.to_minutes(&properties) * 60.0 / working
        } else {
            0.0
        };
        Self::new(start, finish, total_amount, Duration::minutes(per_hour))
    }

    /// Total work of the item.
    #[inline]
    pub fn total_amount(&self) -> Duration {
        self.total_amount
    }

    /// Work per working hour.
    #[inline]
    pub fn amount_per_hour(&self) -> Duration {
        self.amount_per_hour
    }
}

impl Timephased for TimephasedWork {
    fn start(&self) -> NaiveDateTime {
        self.start
    }

    fn finish(&self) -> NaiveDateTime {
        self.finish
    }

    /// Minutes of work per working hour.
    fn hourly_amount(&self, properties: &CalendarProperties) -> f64 {
        self.amount_per_hour.to_minutes(properties)
    }
}

/// Cost allocated over a span.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimephasedCost {
    start: NaiveDateTime,
    finish: NaiveDateTime,
    total_amount: f64,
    amount_per_hour: f64,
}

impl TimephasedCost {
    /// Creates a cost item.
    ///
    /// # Errors
    ///
    /// Returns `SegmentError::Precondition` when `finish` precedes `start`.
    pub fn new(
        start: NaiveDateTime,
        finish: NaiveDateTime,
        total_amount: f64,
        amount_per_hour: f64,
    ) -> Result<Self, SegmentError> {
        check_span(start, finish)?;
        Ok(Self {
            start,
            finish,
            total_amount,
            amount_per_hour,
        })
    }

    /// Total cost of the item.
    #[inline]
    pub fn total_amount(&self) -> f64 {
        self.total_amount
    }

    /// Cost per working hour.
    #[inline]
    pub fn amount_per_hour(&self) -> f64 {
        self.amount_per_hour
    }
}

impl Timephased for TimephasedCost {
    fn start(&self) -> NaiveDateTime {
        self.start
    }

    fn finish(&self) -> NaiveDateTime {
        self.finish
    }

    fn hourly_amount(&self, _properties: &CalendarProperties) -> f64 {
        self.amount_per_hour
    }
}
