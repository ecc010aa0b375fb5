//! Work contours and the items they produce.

use super::error::SegmentError;
use super::item::TimephasedWork;
use calendar_core::calendar::Calendar;
use calendar_core::units::{Duration, TimeUnit};
use chrono::NaiveDateTime;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Number of equal working-time slices a contour is defined over.
pub const CONTOUR_SLICES: usize = 10;

/// Shape of the work density across an assignment.
///
/// Each contour assigns a relative weight to ten equal slices of the
/// assignment's working time. A weight of 100 is full density.
///
/// # Examples
///
/// ```
/// use calendar_timephased::timephased::WorkContour;
///
/// assert_eq!(WorkContour::Flat.weights(), [100.0; 10]);
/// assert_eq!("back-loaded".parse::<WorkContour>().unwrap(), WorkContour::BackLoaded);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WorkContour {
    /// Constant density.
    #[default]
    Flat,
    /// Density rising towards the finish.
    BackLoaded,
    /// Density falling towards the finish.
    FrontLoaded,
    /// Two peaks, at the 30% and 80% slices.
    DoublePeak,
    /// Peak in the first half.
    EarlyPeak,
    /// Peak in the second half.
    LatePeak,
    /// Single central peak with long tails.
    Bell,
    /// Single central plateau with short tails.
    Turtle,
}

impl WorkContour {
    /// All contours.
    pub const ALL: [WorkContour; 8] = [
        WorkContour::Flat,
        WorkContour::BackLoaded,
        WorkContour::FrontLoaded,
        WorkContour::DoublePeak,
        WorkContour::EarlyPeak,
        WorkContour::LatePeak,
        WorkContour::Bell,
        WorkContour::Turtle,
    ];

    /// Relative density of each tenth of the working time.
    pub fn weights(&self) -> [f64; CONTOUR_SLICES] {
        match self {
            WorkContour::Flat => [100.0; CONTOUR_SLICES],
            WorkContour::BackLoaded => [10.0, 15.0, 25.0, 50.0, 50.0, 75.0, 75.0, 100.0, 100.0, 100.0],
            WorkContour::FrontLoaded => [100.0, 100.0, 100.0, 75.0, 75.0, 50.0, 50.0, 25.0, 15.0, 10.0],
            WorkContour::DoublePeak => [25.0, 50.0, 100.0, 50.0, 25.0, 25.0, 50.0, 100.0, 50.0, 25.0],
            WorkContour::EarlyPeak => [25.0, 50.0, 100.0, 100.0, 75.0, 50.0, 50.0, 25.0, 15.0, 10.0],
            WorkContour::LatePeak => [10.0, 15.0, 25.0, 50.0, 50.0, 75.0, 100.0, 100.0, 50.0, 25.0],
            WorkContour::Bell => [10.0, 20.0, 40.0, 80.0, 100.0, 100.0, 80.0, 40.0, 20.0, 10.0],
            WorkContour::Turtle => [25.0, 50.0, 75.0, 100.0, 100.0, 100.0, 100.0, 75.0, 50.0, 25.0],
        }
    }

    /// Returns the standard name for this contour.
    pub fn name(&self) -> &'static str {
        match self {
            WorkContour::Flat => "Flat",
            WorkContour::BackLoaded => "Back Loaded",
            WorkContour::FrontLoaded => "Front Loaded",
            WorkContour::DoublePeak => "Double Peak",
            WorkContour::EarlyPeak => "Early Peak",
            WorkContour::LatePeak => "Late Peak",
            WorkContour::Bell => "Bell",
            WorkContour::Turtle => "Turtle",
        }
    }
}

impl fmt::Display for WorkContour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for WorkContour {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.to_lowercase().replace(['-', '_', ' '], "");
        WorkContour::ALL
            .into_iter()
            .find(|contour| contour.name().to_lowercase().replace(' ', "") == key)
            .ok_or_else(|| format!("Unknown work contour: {}", s))
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use super::WorkContour;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    impl Serialize for WorkContour {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.serialize_str(self.name())
        }
    }

    impl<'de> Deserialize<'de> for WorkContour {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let s = String::deserialize(deserializer)?;
            s.parse().map_err(serde::de::Error::custom)
        }
    }
}

/// Spreads `total_work` over `duration` of working time from `start`,
/// shaped by `contour`.
///
/// The working time is cut into ten equal slices and each slice receives
/// the share of `total_work` given by its contour weight. Neighbouring
/// slices of equal weight are merged, so a flat contour yields one item.
///
/// # Errors
///
/// - `SegmentError::Precondition` if `duration` is not positive
/// - `SegmentError::Calendar` if the calendar runs out of working time
///
/// # Examples
///
/// ```
/// use calendar_core::calendar::Calendar;
/// use calendar_core::units::Duration;
/// use calendar_timephased::timephased::{contour_items, Timephased, WorkContour};
/// use chrono::NaiveDate;
///
/// let calendar = Calendar::standard("Standard");
/// let start = NaiveDate::from_ymd_opt(2026, 1, 26).unwrap().and_hms_opt(8, 0, 0).unwrap();
/// let items = contour_items(
///     &calendar,
///     start,
///     Duration::days(5.0),
///     Duration::hours(20.0),
///     WorkContour::BackLoaded,
/// )
/// .unwrap();
///
/// assert_eq!(items.len(), 6);
/// assert_eq!(items.last().unwrap().finish().date(), NaiveDate::from_ymd_opt(2026, 1, 30).unwrap());
/// ```
pub fn contour_items(
    calendar: &Calendar,
    start: NaiveDateTime,
    duration: Duration,
    total_work: Duration,
    contour: WorkContour,
) -> Result<Vec<TimephasedWork>, SegmentError> {
    let properties = calendar.properties();
    if duration.to_minutes(&properties) <= 0.0 {
        return Err(SegmentError::Precondition {
            reason: format!("contoured duration must be positive, got {duration}"),
        });
    }
    let weights = contour.weights();
    let weight_sum: f64 = weights.iter().sum();
    let total_minutes = total_work.to_minutes(&properties);

    let mut items: Vec<(NaiveDateTime, NaiveDateTime, f64, f64)> = Vec::new();
    let mut slice_start = calendar.next_work_start(start)?;
    for (index, weight) in weights.iter().enumerate() {
        let fraction = (index + 1) as f64 / CONTOUR_SLICES as f64;
        let slice_end = calendar.advance(
            start,
            Duration::new(duration.amount() * fraction, duration.units()),
        )?;
        let work = total_minutes * weight / weight_sum;
        match items.last_mut() {
            Some(last) if last.3 == *weight => {
                last.1 = slice_end;
                last.2 += work;
            }
            _ => items.push((slice_start, slice_end, work, *weight)),
        }
        slice_start = slice_end;
    }
    debug!(
        calendar = %calendar.name(),
        %start,
        %contour,
        items = items.len(),
        "contoured work"
    );

    items
        .into_iter()
        .map(|(from, to, work, _)| {
            let working = calendar.work_between(from, to, TimeUnit::Minutes).amount();
            let per_hour = if working > 0.0 { work * 60.0 / working } else { 0.0 };
            TimephasedWork::new(
                from,
                to,
                Duration::minutes(work).convert_units(total_work.units(), &properties),
                Duration::minutes(per_hour),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timephased::segment::segment_work;
    use crate::timephased::Timephased;
    use crate::timescale::{make_timescale, TimescaleUnit};
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn monday() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 1, 26)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_weights_mirror() {
        let mut back = WorkContour::BackLoaded.weights();
        back.reverse();
        assert_eq!(back, WorkContour::FrontLoaded.weights());
        let mut late = WorkContour::LatePeak.weights();
        late.reverse();
        assert_eq!(late, WorkContour::EarlyPeak.weights());
    }

    #[test]
    fn test_names_parse() {
        for contour in WorkContour::ALL {
            assert_eq!(contour.name().parse::<WorkContour>().unwrap(), contour);
            assert_eq!(contour.to_string(), contour.name());
        }
        assert_eq!("double_peak".parse::<WorkContour>().unwrap(), WorkContour::DoublePeak);
        assert!("zigzag".parse::<WorkContour>().is_err());
    }

    #[test]
    fn test_flat_contour_is_one_item() {
        let calendar = Calendar::standard("Standard");
        let items = contour_items(
            &calendar,
            monday(),
            Duration::days(1.0),
            Duration::hours(8.0),
            WorkContour::Flat,
        )
        .unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].start(), monday());
        assert_eq!(items[0].finish(), monday() + chrono::TimeDelta::hours(9));
        assert_relative_eq!(items[0].amount_per_hour().amount(), 60.0, epsilon = 1e-9);
        assert_relative_eq!(items[0].total_amount().amount(), 8.0, epsilon = 1e-9);
        assert_eq!(items[0].total_amount().units(), TimeUnit::Hours);
    }

    #[test]
    fn test_contours_conserve_total_work() {
        let calendar = Calendar::standard("Standard");
        let buckets = make_timescale(monday(), TimescaleUnit::Days, 14).unwrap();
        for contour in WorkContour::ALL {
            let items = contour_items(
                &calendar,
                monday(),
                Duration::days(10.0),
                Duration::hours(40.0),
                contour,
            )
            .unwrap();
            let daily = segment_work(&calendar, &items, &buckets, TimeUnit::Hours).unwrap();
            let total: f64 = daily.iter().flatten().map(|d| d.amount()).sum();
            assert_relative_eq!(total, 40.0, epsilon = 1e-6);
            // weekends carry no working time
            assert!(daily[5].is_none() && daily[6].is_none(), "{contour}");
        }
    }

    #[test]
    fn test_back_loaded_rises() {
        let calendar = Calendar::standard("Standard");
        let items = contour_items(
            &calendar,
            monday(),
            Duration::days(10.0),
            Duration::hours(40.0),
            WorkContour::BackLoaded,
        )
        .unwrap();
        let densities: Vec<f64> = items.iter().map(|i| i.amount_per_hour().amount()).collect();
        assert!(densities.windows(2).all(|pair| pair[0] < pair[1]));
        // the last three tenths share one weight
        assert_relative_eq!(
            items.last().unwrap().total_amount().amount(),
            40.0 * 300.0 / 600.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_non_positive_duration_is_rejected() {
        let calendar = Calendar::standard("Standard");
        let result = contour_items(
            &calendar,
            monday(),
            Duration::zero(TimeUnit::Days),
            Duration::hours(8.0),
            WorkContour::Bell,
        );
        assert!(matches!(result, Err(SegmentError::Precondition { .. })));
    }
}
