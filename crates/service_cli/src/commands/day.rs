//! Day command implementation
//!
//! Shows how a calendar resolves one date.

use calendar_core::calendar::Calendar;
use chrono::{Datelike, NaiveDate};
use std::fmt::Write;
use tracing::info;

use crate::config::WorkcalConfig;
use crate::Result;

/// Run the day command
pub fn run(config: &WorkcalConfig, calendar: Option<&str>, date: NaiveDate) -> Result<()> {
    let calendar = config.calendar(calendar)?;
    info!(calendar = %calendar.name(), %date, "resolving day");
    print!("{}", render(&calendar, date));
    Ok(())
}

/// Multi-line description of `date` on `calendar`
pub fn render(calendar: &Calendar, date: NaiveDate) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({}) on {}", date, date.weekday(), calendar.name());
    if let Some(exception) = calendar.exception_for(date) {
        let _ = writeln!(
            out,
            "  exception: {} {}..{}",
            exception.name().unwrap_or("unnamed"),
            exception.from(),
            exception.to()
        );
    }
    if !calendar.is_working_day(date) {
        let _ = writeln!(out, "  non-working");
        return out;
    }
    let ranges: Vec<String> = calendar
        .working_ranges(date)
        .iter()
        .map(ToString::to_string)
        .collect();
    let _ = writeln!(out, "  hours: {}", ranges.join(", "));
    if let (Some(start), Some(finish)) = (calendar.start_time(date), calendar.finish_time(date)) {
        let _ = writeln!(out, "  start: {}  finish: {}", start.format("%H:%M"), finish.format("%H:%M"));
    }
    let _ = writeln!(out, "  working minutes: {}", calendar.working_minutes(date));
    out
}
