//! Check command implementation
//!
//! Validates the configuration and summarises every calendar.

use chrono::Weekday;
use std::fmt::Write;
use tracing::info;

use crate::config::WorkcalConfig;
use crate::Result;

const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Run the check command
pub fn run(config: &WorkcalConfig) -> Result<()> {
    info!("Checking configuration...");
    print!("{}", render(config)?);
    info!("Configuration OK");
    Ok(())
}

/// One line per calendar: name, base, weekly working hours and exception count
pub fn render(config: &WorkcalConfig) -> Result<String> {
    config.validate()?;
    let mut out = String::new();
    for (name, calendar) in config.calendars()? {
        let weekly: i64 = WEEK
            .iter()
            .map(|weekday| calendar.weekday_working_minutes(*weekday))
            .sum();
        let base = calendar
            .base()
            .map(|b| format!(" (base {})", b.name()))
            .unwrap_or_default();
        let _ = writeln!(
            out,
            "{}{}: {} h/week, {} exception(s)",
            name,
            base,
            weekly as f64 / 60.0,
            calendar.exceptions().len()
        );
    }
    Ok(out)
}
