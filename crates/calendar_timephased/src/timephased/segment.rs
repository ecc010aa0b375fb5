//! Apportionment of timephased items into timescale buckets.

use super::baseline::TimephasedBaseline;
use super::error::SegmentError;
use super::item::{Timephased, TimephasedCost, TimephasedWork};
use calendar_core::calendar::Calendar;
use calendar_core::types::DateTimeRange;
use calendar_core::units::{Duration, TimeUnit};
use tracing::trace;

/// Apportions `items` into `buckets` by working time.
///
/// Each bucket yields:
/// - `None` when it contains no working time
/// - `None` when no item shares any of that working time
/// - otherwise the sum over overlapping items of
///   `hourly amount × working hours shared with the bucket`, which may be
///   zero for items carrying a zero density
///
/// An item straddling bucket boundaries contributes to each bucket in
/// proportion to working minutes, never wall-clock minutes.
///
/// # Errors
///
/// Returns `SegmentError::Precondition` when an item finishes before it
/// starts, items are unsorted or overlap, a bucket is empty, or buckets are
/// unsorted or overlap. Touching items or buckets are accepted.
///
/// # Examples
///
/// ```
/// use calendar_core::calendar::Calendar;
/// use calendar_core::units::Duration;
/// use calendar_timephased::timephased::{segment, TimephasedWork};
/// use calendar_timephased::timescale::{make_timescale, TimescaleUnit};
/// use chrono::NaiveDate;
///
/// let calendar = Calendar::standard("Standard");
/// let day = NaiveDate::from_ymd_opt(2026, 1, 28).unwrap();
/// let item = TimephasedWork::new(
///     day.and_hms_opt(8, 0, 0).unwrap(),
///     day.and_hms_opt(17, 0, 0).unwrap(),
///     Duration::hours(8.0),
///     Duration::minutes(60.0),
/// )
/// .unwrap();
/// // hourly ranges count from midnight; keep 11:00 to 14:00
/// let hours = make_timescale(day.and_hms_opt(11, 0, 0).unwrap(), TimescaleUnit::Hours, 14).unwrap();
/// let buckets = &hours[11..];
///
/// let minutes = segment(&calendar, &[item], buckets).unwrap();
/// assert_eq!(minutes, vec![Some(60.0), None, Some(60.0)]);
/// ```
pub fn segment<T: Timephased>(
    calendar: &Calendar,
    items: &[T],
    buckets: &[DateTimeRange],
) -> Result<Vec<Option<f64>>, SegmentError> {
    validate_items(items)?;
    validate_buckets(buckets)?;
    let properties = calendar.properties();

    let mut first = 0;
    let mut results = Vec::with_capacity(buckets.len());
    for bucket in buckets {
        while first < items.len() && items[first].finish() <= bucket.start() {
            first += 1;
        }
        let candidates = items[first..]
            .iter()
            .take_while(|item| item.start() < bucket.end());

        let mut total = None;
        let working = calendar.working_spans(*bucket);
        if !working.is_empty() {
            for item in candidates {
                let minutes = shared_minutes(&working, item.span());
                if minutes > 0.0 {
                    *total.get_or_insert(0.0) += item.hourly_amount(&properties) * minutes / 60.0;
                }
            }
        }
        trace!(%bucket, ?total, "segmented bucket");
        results.push(total);
    }
    Ok(results)
}

/// Work per bucket, converted to `units`.
///
/// # Errors
///
/// As [`segment()`].
pub fn segment_work(
    calendar: &Calendar,
    items: &[TimephasedWork],
    buckets: &[DateTimeRange],
    units: TimeUnit,
) -> Result<Vec<Option<Duration>>, SegmentError> {
    let properties = calendar.properties();
    Ok(segment(calendar, items, buckets)?
        .into_iter()
        .map(|minutes| minutes.map(|m| Duration::minutes(m).convert_units(units, &properties)))
        .collect())
}

/// Cost per bucket.
///
/// # Errors
///
/// As [`segment()`].
pub fn segment_cost(
    calendar: &Calendar,
    items: &[TimephasedCost],
    buckets: &[DateTimeRange],
) -> Result<Vec<Option<f64>>, SegmentError> {
    segment(calendar, items, buckets)
}

/// Baseline work per bucket, drawn from baseline `index`.
///
/// # Errors
///
/// As [`segment()`], plus `SegmentError::Precondition` for an index outside
/// the baseline range.
pub fn segment_baseline_work(
    calendar: &Calendar,
    baselines: &TimephasedBaseline<TimephasedWork>,
    index: usize,
    buckets: &[DateTimeRange],
    units: TimeUnit,
) -> Result<Vec<Option<Duration>>, SegmentError> {
    segment_work(calendar, baselines.get(index)?, buckets, units)
}

/// Baseline cost per bucket, drawn from baseline `index`.
///
/// # Errors
///
/// As [`segment_baseline_work`].
pub fn segment_baseline_cost(
    calendar: &Calendar,
    baselines: &TimephasedBaseline<TimephasedCost>,
    index: usize,
    buckets: &[DateTimeRange],
) -> Result<Vec<Option<f64>>, SegmentError> {
    segment_cost(calendar, baselines.get(index)?, buckets)
}

fn shared_minutes(working: &[DateTimeRange], span: DateTimeRange) -> f64 {
    working
        .iter()
        .filter_map(|w| w.intersection(&span))
        .map(|r| r.duration_minutes())
        .sum()
}

fn validate_items<T: Timephased>(items: &[T]) -> Result<(), SegmentError> {
    for (index, item) in items.iter().enumerate() {
        if item.finish() < item.start() {
            return Err(SegmentError::Precondition {
                reason: format!(
                    "item {index} finishes at {} before it starts at {}",
                    item.finish(),
                    item.start()
                ),
            });
        }
    }
    for (index, pair) in items.windows(2).enumerate() {
        if pair[1].start() < pair[0].finish() {
            return Err(SegmentError::Precondition {
                reason: format!(
                    "item {} starting at {} is unsorted or overlaps item {index} finishing at {}",
                    index + 1,
                    pair[1].start(),
                    pair[0].finish()
                ),
            });
        }
    }
    Ok(())
}

fn validate_buckets(buckets: &[DateTimeRange]) -> Result<(), SegmentError> {
    if let Some(index) = buckets.iter().position(DateTimeRange::is_empty) {
        return Err(SegmentError::Precondition {
            reason: format!("bucket {index} ({}) is empty", buckets[index]),
        });
    }
    if let Some(index) = buckets
        .windows(2)
        .position(|pair| pair[1].start() < pair[0].end())
    {
        return Err(SegmentError::Precondition {
            reason: format!(
                "bucket {} ({}) is unsorted or overlaps bucket {index} ({})",
                index + 1,
                buckets[index + 1],
                buckets[index]
            ),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timescale::{make_timescale, TimescaleUnit};
    use approx::assert_relative_eq;
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 1, 28)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn bucket(from: NaiveDateTime, to: NaiveDateTime) -> DateTimeRange {
        DateTimeRange::new(from, to).unwrap()
    }

    fn work(from: NaiveDateTime, to: NaiveDateTime, per_hour: f64) -> TimephasedWork {
        let hours = (to - from).num_minutes() as f64 / 60.0;
        TimephasedWork::new(
            from,
            to,
            Duration::minutes(hours * per_hour),
            Duration::minutes(per_hour),
        )
        .unwrap()
    }

    fn single(from: NaiveDateTime, to: NaiveDateTime) -> Option<f64> {
        let calendar = Calendar::standard("Standard");
        let items = [work(at(8, 0), at(17, 0), 60.0)];
        segment(&calendar, &items, &[bucket(from, to)]).unwrap()[0]
    }

    #[test]
    fn test_single_item_windows() {
        assert_eq!(single(at(7, 0), at(9, 0)), Some(60.0));
        assert_eq!(single(at(8, 0), at(10, 0)), Some(120.0));
        assert_eq!(single(at(11, 0), at(13, 0)), Some(60.0));
        assert_eq!(single(at(12, 0), at(13, 0)), None);
        assert_eq!(single(at(12, 15), at(12, 45)), None);
        assert_eq!(single(at(12, 0), at(14, 0)), Some(60.0));
        assert_eq!(single(at(8, 0), at(17, 0)), Some(480.0));
        assert_eq!(single(at(16, 0), at(18, 0)), Some(60.0));
    }

    #[test]
    fn test_multiple_items_add_up() {
        let calendar = Calendar::standard("Standard");
        let items = [
            work(at(8, 0), at(10, 0), 60.0),
            work(at(10, 0), at(12, 0), 30.0),
            work(at(13, 0), at(15, 0), 60.0),
            work(at(15, 0), at(17, 0), 30.0),
        ];
        let next_midnight = at(0, 0) + chrono::TimeDelta::days(1);
        let buckets = [
            bucket(at(0, 0), at(12, 0)),
            bucket(at(12, 0), next_midnight),
        ];
        assert_eq!(
            segment(&calendar, &items, &buckets).unwrap(),
            vec![Some(180.0), Some(180.0)]
        );
        let whole = [bucket(at(0, 0), next_midnight)];
        assert_eq!(segment(&calendar, &items, &whole).unwrap(), vec![Some(360.0)]);
    }

    #[test]
    fn test_zero_density_is_distinct_from_no_data() {
        let calendar = Calendar::standard("Standard");
        let items = [work(at(8, 0), at(9, 0), 0.0), work(at(9, 0), at(17, 0), 60.0)];
        let hours = make_timescale(at(6, 0), TimescaleUnit::Hours, 10).unwrap();
        assert_eq!(
            segment(&calendar, &items, &hours[6..]).unwrap(),
            vec![None, None, Some(0.0), Some(60.0)]
        );
    }

    #[test]
    fn test_empty_items_give_none_everywhere() {
        let calendar = Calendar::standard("Standard");
        let buckets = make_timescale(at(0, 0), TimescaleUnit::Hours, 24).unwrap();
        let items: [TimephasedWork; 0] = [];
        let result = segment(&calendar, &items, &buckets).unwrap();
        assert!(result.iter().all(Option::is_none));
        assert_eq!(result.len(), 24);
    }

    #[test]
    fn test_item_in_non_working_time_gives_none() {
        let calendar = Calendar::standard("Standard");
        let items = [work(at(12, 0), at(13, 0), 60.0)];
        let buckets = [bucket(at(8, 0), at(17, 0))];
        assert_eq!(segment(&calendar, &items, &buckets).unwrap(), vec![None]);
    }

    #[test]
    fn test_segment_work_converts_units() {
        let calendar = Calendar::standard("Standard");
        let items = [work(at(8, 0), at(17, 0), 60.0)];
        let buckets = [bucket(at(0, 0), at(0, 0) + chrono::TimeDelta::days(1))];
        let days = segment_work(&calendar, &items, &buckets, TimeUnit::Days).unwrap();
        let day = days[0].unwrap();
        assert_eq!(day.units(), TimeUnit::Days);
        assert_relative_eq!(day.amount(), 1.0);
    }

    #[test]
    fn test_segment_cost_and_baselines() {
        let calendar = Calendar::standard("Standard");
        let cost = TimephasedCost::new(at(8, 0), at(17, 0), 400.0, 50.0).unwrap();
        let buckets = [bucket(at(7, 0), at(9, 0)), bucket(at(9, 0), at(13, 0))];
        assert_eq!(
            segment_cost(&calendar, &[cost], &buckets).unwrap(),
            vec![Some(50.0), Some(150.0)]
        );

        let mut baselines = TimephasedBaseline::new();
        baselines.set(2, vec![cost]).unwrap();
        assert_eq!(
            segment_baseline_cost(&calendar, &baselines, 2, &buckets).unwrap(),
            vec![Some(50.0), Some(150.0)]
        );
        assert_eq!(
            segment_baseline_cost(&calendar, &baselines, 0, &buckets).unwrap(),
            vec![None, None]
        );

        let mut work_baselines = TimephasedBaseline::new();
        work_baselines
            .set(1, vec![work(at(8, 0), at(17, 0), 60.0)])
            .unwrap();
        let hours =
            segment_baseline_work(&calendar, &work_baselines, 1, &buckets, TimeUnit::Hours)
                .unwrap();
        assert_relative_eq!(hours[1].unwrap().amount(), 3.0);
        assert!(segment_baseline_work(&calendar, &work_baselines, 11, &buckets, TimeUnit::Hours)
            .is_err());
    }

    #[test]
    fn test_touching_items_and_buckets_are_accepted() {
        let calendar = Calendar::standard("Standard");
        let items = [work(at(8, 0), at(10, 0), 60.0), work(at(10, 0), at(10, 0), 60.0)];
        let buckets = [bucket(at(8, 0), at(10, 0)), bucket(at(10, 0), at(11, 0))];
        assert_eq!(
            segment(&calendar, &items, &buckets).unwrap(),
            vec![Some(120.0), None]
        );
    }

    #[test]
    fn test_preconditions() {
        let calendar = Calendar::standard("Standard");
        let buckets = [bucket(at(8, 0), at(9, 0))];

        let overlapping = [work(at(8, 0), at(10, 0), 60.0), work(at(9, 0), at(11, 0), 60.0)];
        assert!(matches!(
            segment(&calendar, &overlapping, &buckets),
            Err(SegmentError::Precondition { .. })
        ));

        let unsorted = [work(at(10, 0), at(11, 0), 60.0), work(at(8, 0), at(9, 0), 60.0)];
        assert!(segment(&calendar, &unsorted, &buckets).is_err());

        let items = [work(at(8, 0), at(9, 0), 60.0)];
        let empty_bucket = [bucket(at(8, 0), at(8, 0))];
        assert!(segment(&calendar, &items, &empty_bucket).is_err());

        let reversed_buckets = [bucket(at(9, 0), at(10, 0)), bucket(at(8, 0), at(9, 0))];
        assert!(segment(&calendar, &items, &reversed_buckets).is_err());
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_conservation_over_covering_buckets(
                start_hour in 0u32..24,
                hours in 1i64..200,
                per_hour in 0.0f64..120.0,
                unit_index in 0usize..6,
            ) {
                let calendar = Calendar::standard("Standard");
                let from = at(start_hour, 0);
                let to = from + chrono::TimeDelta::hours(hours);
                let item = TimephasedWork::new(
                    from,
                    to,
                    Duration::zero(TimeUnit::Minutes),
                    Duration::minutes(per_hour),
                )
                .unwrap();
                let units = [
                    TimescaleUnit::Hours,
                    TimescaleUnit::Days,
                    TimescaleUnit::Weeks,
                    TimescaleUnit::ThirdsOfMonths,
                    TimescaleUnit::Months,
                    TimescaleUnit::Years,
                ];
                let buckets = make_timescale(from, units[unit_index], 400).unwrap();
                let covered: Vec<_> = buckets
                    .into_iter()
                    .take_while(|b| b.start() < to)
                    .collect();

                let total: f64 = segment(&calendar, &[item], &covered)
                    .unwrap()
                    .into_iter()
                    .flatten()
                    .sum();
                let working = calendar.work_between(from, to, TimeUnit::Hours).amount();
                prop_assert!((total - working * per_hour).abs() < 1e-6 * (1.0 + total.abs()));
            }

            #[test]
            fn prop_non_working_buckets_are_none(day_offset in 0i64..60, per_hour in 1.0f64..60.0) {
                let calendar = Calendar::standard("Standard");
                let from = at(0, 0) + chrono::TimeDelta::days(day_offset);
                let item = TimephasedWork::new(
                    from,
                    from + chrono::TimeDelta::days(1),
                    Duration::zero(TimeUnit::Minutes),
                    Duration::minutes(per_hour),
                )
                .unwrap();
                let buckets = make_timescale(from, TimescaleUnit::Hours, 24).unwrap();
                let result = segment(&calendar, &[item], &buckets).unwrap();
                for (bucket, value) in buckets.iter().zip(result) {
                    let working = calendar.working_spans(*bucket);
                    prop_assert_eq!(working.is_empty(), value.is_none());
                }
            }
        }
    }
}
