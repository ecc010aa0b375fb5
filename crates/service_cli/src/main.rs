//! workcal - Working-Time Calendar CLI
//!
//! Command-line access to the calendar engine and the timephased segmenter.
//!
//! # Commands
//!
//! - `workcal work` - Working time between two instants
//! - `workcal advance` - Instant reached after a working duration
//! - `workcal day` - How a calendar resolves one date
//! - `workcal timescale` - Report buckets at a granularity
//! - `workcal segment --items <file>` - Apportion timephased data into buckets
//! - `workcal check` - Validate the calendar configuration
//!
//! Calendars are read from a TOML file given by `--config` or the
//! `WORKCAL_CONFIG` environment variable; without one the standard
//! Monday-to-Friday calendar is used.

use anyhow::Context;
use calendar_core::units::{Duration, TimeUnit};
use calendar_timephased::timescale::{make_timescale, TimescaleUnit};
use chrono::{NaiveDate, NaiveDateTime, Weekday};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;

use commands::{parse_date, parse_datetime, OutputFormat};
use config::{CliArgs, CONFIG_ENV, LOG_LEVEL_ENV};
pub use error::{CliError, Result};

/// Working-time calendar and timephased segmentation CLI
#[derive(Parser)]
#[command(name = "workcal")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = CONFIG_ENV)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true, env = LOG_LEVEL_ENV)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Working time between two instants
    Work {
        /// Calendar name
        #[arg(short = 'C', long)]
        calendar: Option<String>,

        /// Start instant (YYYY-MM-DDTHH:MM)
        #[arg(short, long, value_parser = parse_datetime)]
        start: NaiveDateTime,

        /// End instant (YYYY-MM-DDTHH:MM)
        #[arg(short, long, value_parser = parse_datetime)]
        end: NaiveDateTime,

        /// Units of the result (e.g. h, d, elapsed days)
        #[arg(short, long, default_value = "h")]
        units: TimeUnit,
    },

    /// Instant reached after a signed working duration
    Advance {
        /// Calendar name
        #[arg(short = 'C', long)]
        calendar: Option<String>,

        /// Anchor instant (YYYY-MM-DDTHH:MM)
        #[arg(short, long, value_parser = parse_datetime)]
        from: NaiveDateTime,

        /// Duration such as 24h, -2d or 3ed
        #[arg(short, long, allow_hyphen_values = true)]
        duration: Duration,
    },

    /// Resolved working hours of one date
    Day {
        /// Calendar name
        #[arg(short = 'C', long)]
        calendar: Option<String>,

        /// Date (YYYY-MM-DD)
        #[arg(short, long, value_parser = parse_date)]
        date: NaiveDate,
    },

    /// Report buckets at a granularity
    Timescale {
        /// Instant the first bucket is aligned from
        #[arg(short, long, value_parser = parse_datetime)]
        start: NaiveDateTime,

        /// Bucket granularity (day, week, third, month, quarter, half-year, year)
        #[arg(short, long, default_value = "day")]
        unit: TimescaleUnit,

        /// Number of buckets
        #[arg(short = 'n', long, default_value = "7")]
        count: usize,

        /// First day of the week
        #[arg(short, long, default_value = "monday")]
        week_start: Weekday,

        /// Output format
        #[arg(short = 'F', long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Apportion timephased work and cost into buckets
    Segment {
        /// Calendar name
        #[arg(short = 'C', long)]
        calendar: Option<String>,

        /// Items file (TOML)
        #[arg(short, long)]
        items: PathBuf,

        /// Instant the first bucket is aligned from
        #[arg(short, long, value_parser = parse_datetime)]
        start: NaiveDateTime,

        /// Bucket granularity
        #[arg(short, long, default_value = "day")]
        unit: TimescaleUnit,

        /// Number of buckets
        #[arg(short = 'n', long, default_value = "7")]
        count: usize,

        /// Units of the work column
        #[arg(long, default_value = "h")]
        units: TimeUnit,

        /// Output format
        #[arg(short = 'F', long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Validate the calendar configuration
    Check,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = config::build_config(&CliArgs {
        config_file: cli.config.clone(),
        log_level: cli.log_level.clone(),
    })
    .context("loading configuration")?;

    // Initialise tracing; RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_filter_str()));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    info!(log_level = %config.log_level, "configuration loaded");

    match cli.command {
        Commands::Work {
            calendar,
            start,
            end,
            units,
        } => commands::work::run(&config, calendar.as_deref(), start, end, units)?,
        Commands::Advance {
            calendar,
            from,
            duration,
        } => commands::advance::run(&config, calendar.as_deref(), from, duration)?,
        Commands::Day { calendar, date } => {
            commands::day::run(&config, calendar.as_deref(), date)?
        }
        Commands::Timescale {
            start,
            unit,
            count,
            week_start,
            format,
        } => commands::timescale::run(start, unit, count, week_start, format)?,
        Commands::Segment {
            calendar,
            items,
            start,
            unit,
            count,
            units,
            format,
        } => {
            let buckets = make_timescale(start, unit, count).map_err(CliError::from)?;
            commands::segment::run(&config, calendar.as_deref(), &items, &buckets, units, format)
                .with_context(|| format!("segmenting {}", items.display()))?
        }
        Commands::Check => commands::check::run(&config)?,
    }
    Ok(())
}
