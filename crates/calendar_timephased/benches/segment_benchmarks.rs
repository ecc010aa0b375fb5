//! Criterion benchmarks for timescale generation and segmentation.
//!
//! Measures a year of contoured work apportioned into daily, weekly and
//! monthly buckets on the standard calendar.

use calendar_core::calendar::Calendar;
use calendar_core::units::{Duration, TimeUnit};
use calendar_timephased::timephased::{contour_items, segment_work, WorkContour};
use calendar_timephased::timescale::{make_timescale, TimescaleUnit};
use chrono::{NaiveDate, NaiveDateTime};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn start() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(8, 0, 0)
        .unwrap()
}

/// Benchmark bucket generation.
fn bench_make_timescale(c: &mut Criterion) {
    let mut group = c.benchmark_group("make_timescale");
    for (label, unit, count) in [
        ("days", TimescaleUnit::Days, 365),
        ("thirds", TimescaleUnit::ThirdsOfMonths, 36),
        ("months", TimescaleUnit::Months, 12),
    ] {
        group.bench_function(label, |b| {
            b.iter(|| make_timescale(black_box(start()), unit, count).unwrap());
        });
    }
    group.finish();
}

/// Benchmark apportionment of a contoured year.
fn bench_segment_work(c: &mut Criterion) {
    let mut group = c.benchmark_group("segment_work");
    let calendar = Calendar::standard("Standard");
    let items = contour_items(
        &calendar,
        start(),
        Duration::days(250.0),
        Duration::hours(1500.0),
        WorkContour::Bell,
    )
    .unwrap();

    for (label, unit, count) in [
        ("days", TimescaleUnit::Days, 365),
        ("weeks", TimescaleUnit::Weeks, 53),
        ("months", TimescaleUnit::Months, 12),
    ] {
        let buckets = make_timescale(start(), unit, count).unwrap();
        group.bench_with_input(BenchmarkId::new(label, count), &buckets, |b, buckets| {
            b.iter(|| segment_work(&calendar, black_box(&items), buckets, TimeUnit::Hours).unwrap());
        });
    }
    group.finish();
}

criterion_group!(benches, bench_make_timescale, bench_segment_work);
criterion_main!(benches);
