//! Advance command implementation
//!
//! Finds the instant reached after a signed working duration.

use calendar_core::calendar::Calendar;
use calendar_core::units::Duration;
use chrono::NaiveDateTime;
use tracing::info;

use super::format_datetime;
use crate::config::WorkcalConfig;
use crate::Result;

/// Run the advance command
pub fn run(
    config: &WorkcalConfig,
    calendar: Option<&str>,
    from: NaiveDateTime,
    duration: Duration,
) -> Result<()> {
    let calendar = config.calendar(calendar)?;
    info!(calendar = %calendar.name(), %from, %duration, "advancing");
    println!("{}", render(&calendar, from, duration)?);
    Ok(())
}

/// The instant reached from `from` after `duration`
pub fn render(calendar: &Calendar, from: NaiveDateTime, duration: Duration) -> Result<String> {
    Ok(format_datetime(calendar.advance(from, duration)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::parse_datetime;
    use crate::CliError;
    use calendar_core::calendar::DayType;
    use chrono::Weekday;

    #[test]
    fn test_render_across_weekend() {
        let calendar = Calendar::standard("Standard");
        let from = parse_datetime("2003-10-09T08:00").unwrap();
        assert_eq!(
            render(&calendar, from, "24h".parse().unwrap()).unwrap(),
            "2003-10-13T17:00"
        );
        assert_eq!(
            render(&calendar, from, "-1d".parse().unwrap()).unwrap(),
            "2003-10-08T08:00"
        );
    }

    #[test]
    fn test_render_without_working_time() {
        let mut calendar = Calendar::new("Idle");
        for weekday in [
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
            Weekday::Sun,
        ] {
            calendar.set_day_type(weekday, DayType::NonWorking);
        }
        let from = parse_datetime("2024-01-01T08:00").unwrap();
        assert!(matches!(
            render(&calendar, from, Duration::hours(1.0)),
            Err(CliError::Calendar(_))
        ));
    }
}
