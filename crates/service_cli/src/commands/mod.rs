//! CLI command implementations
//!
//! Each submodule implements a specific CLI command. Commands build their
//! output as a string so it can be checked without a terminal.

pub mod advance;
pub mod check;
pub mod day;
pub mod segment;
pub mod timescale;
pub mod work;

use chrono::{NaiveDate, NaiveDateTime};

/// Output format for tabular commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Parse a local date-time such as `2026-01-28T08:00`; a bare date means midnight
pub fn parse_datetime(s: &str) -> std::result::Result<NaiveDateTime, String> {
    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(s, format).ok())
        .or_else(|| parse_date(s).ok().map(calendar_core::types::midnight))
        .ok_or_else(|| format!("Invalid date-time: {} (expected YYYY-MM-DDTHH:MM)", s))
}

/// Parse a date such as `2026-01-28`
pub fn parse_date(s: &str) -> std::result::Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| format!("Invalid date: {} (expected YYYY-MM-DD)", s))
}

/// Format an instant the way the commands accept it
pub fn format_datetime(instant: NaiveDateTime) -> String {
    instant.format("%Y-%m-%dT%H:%M").to_string()
}
