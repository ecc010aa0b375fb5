//! Work command implementation
//!
//! Measures the working time between two instants.

use calendar_core::calendar::Calendar;
use calendar_core::units::TimeUnit;
use chrono::NaiveDateTime;
use tracing::info;

use crate::config::WorkcalConfig;
use crate::Result;

/// Run the work command
pub fn run(
    config: &WorkcalConfig,
    calendar: Option<&str>,
    start: NaiveDateTime,
    end: NaiveDateTime,
    units: TimeUnit,
) -> Result<()> {
    let calendar = config.calendar(calendar)?;
    info!(calendar = %calendar.name(), %start, %end, %units, "measuring work");
    println!("{}", render(&calendar, start, end, units));
    Ok(())
}

/// Working time between `start` and `end`, e.g. `8.875d`
pub fn render(calendar: &Calendar, start: NaiveDateTime, end: NaiveDateTime, units: TimeUnit) -> String {
    calendar.work_between(start, end, units).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::parse_datetime;

    #[test]
    fn test_render_signed_work() {
        let calendar = Calendar::standard("Standard");
        let start = parse_datetime("2006-03-14T08:00").unwrap();
        let end = parse_datetime("2006-03-15T08:00").unwrap();
        assert_eq!(render(&calendar, start, end, TimeUnit::Days), "1d");
        assert_eq!(render(&calendar, end, start, TimeUnit::Hours), "-8h");
    }
}
