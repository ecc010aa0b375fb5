//! Criterion benchmarks for calendar_core working-time queries.
//!
//! Measures `work_between` and `advance` over increasing spans on the
//! standard calendar and a night-shift calendar with midnight-crossing
//! ranges.

use calendar_core::calendar::{Calendar, CalendarBuilder};
use calendar_core::units::{Duration, TimeUnit};
use chrono::{NaiveDate, NaiveDateTime, TimeDelta, Weekday};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn anchor() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(8, 0, 0)
        .unwrap()
}

fn night_shift() -> Calendar {
    let mut builder = CalendarBuilder::new("Night");
    for weekday in [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ] {
        builder = builder
            .hours(weekday, "00:00-04:30".parse().unwrap())
            .hours(weekday, "08:30-00:00".parse().unwrap());
    }
    builder.build().unwrap()
}

/// Benchmark working-time measurement over growing spans.
fn bench_work_between(c: &mut Criterion) {
    let mut group = c.benchmark_group("work_between");
    let calendars = [("standard", Calendar::standard("Standard")), ("night", night_shift())];

    for (label, calendar) in &calendars {
        for days in [1i64, 30, 365] {
            let end = anchor() + TimeDelta::days(days);
            group.bench_with_input(
                BenchmarkId::new(*label, days),
                &end,
                |b, end| {
                    b.iter(|| calendar.work_between(black_box(anchor()), black_box(*end), TimeUnit::Hours));
                },
            );
        }
    }

    group.finish();
}

/// Benchmark date arithmetic in both directions.
fn bench_advance(c: &mut Criterion) {
    let mut group = c.benchmark_group("advance");
    let calendar = Calendar::standard("Standard");

    for hours in [8.0, 160.0, 2080.0] {
        group.bench_with_input(BenchmarkId::new("forward", hours), &hours, |b, &hours| {
            b.iter(|| calendar.advance(black_box(anchor()), Duration::hours(hours)).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("backward", hours), &hours, |b, &hours| {
            b.iter(|| calendar.advance(black_box(anchor()), Duration::hours(-hours)).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_work_between, bench_advance);
criterion_main!(benches);
