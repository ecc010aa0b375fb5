//! Timescale command implementation
//!
//! Prints the buckets a report at the given granularity would use.

use calendar_timephased::timescale::{Timescale, TimescaleBuilder, TimescaleUnit};
use chrono::{NaiveDateTime, Weekday};
use serde::Serialize;
use tracing::info;

use super::{format_datetime, OutputFormat};
use crate::Result;

#[derive(Debug, Serialize)]
struct BucketRow {
    index: usize,
    start: String,
    end: String,
}

/// Run the timescale command
pub fn run(
    start: NaiveDateTime,
    unit: TimescaleUnit,
    count: usize,
    week_start: Weekday,
    format: OutputFormat,
) -> Result<()> {
    info!(%start, %unit, count, %week_start, "generating timescale");
    let timescale = TimescaleBuilder::new()
        .start(start)
        .unit(unit)
        .count(count)
        .week_start(week_start)
        .build()?;
    print!("{}", render(&timescale, format)?);
    Ok(())
}

/// One line per bucket, or a JSON array
pub fn render(timescale: &Timescale, format: OutputFormat) -> Result<String> {
    let rows: Vec<BucketRow> = timescale
        .iter()
        .enumerate()
        .map(|(index, range)| BucketRow {
            index,
            start: format_datetime(range.start()),
            end: format_datetime(range.end()),
        })
        .collect();
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&rows)? + "\n"),
        OutputFormat::Text => Ok(rows
            .iter()
            .map(|row| format!("{:>4}  {}  {}\n", row.index, row.start, row.end))
            .collect()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::parse_datetime;

    fn quarters() -> Timescale {
        TimescaleBuilder::new()
            .start(parse_datetime("2023-06-22T09:00").unwrap())
            .unit(TimescaleUnit::Quarters)
            .count(2)
            .build()
            .unwrap()
    }

    #[test]
    fn test_render_text() {
        let out = render(&quarters(), OutputFormat::Text).unwrap();
        assert_eq!(
            out,
            "   0  2023-04-01T00:00  2023-07-01T00:00\n   1  2023-07-01T00:00  2023-10-01T00:00\n"
        );
    }

    #[test]
    fn test_render_json() {
        let out = render(&quarters(), OutputFormat::Json).unwrap();
        let rows: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(rows[1]["start"], "2023-07-01T00:00");
        assert_eq!(rows.as_array().map(Vec::len), Some(2));
    }
}
