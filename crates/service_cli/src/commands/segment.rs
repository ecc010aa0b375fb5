//! Segment command implementation
//!
//! Apportions timephased work and cost read from a TOML items file into
//! timescale buckets.
//!
//! ```toml
//! [[work]]
//! start = "2026-01-28T08:00:00"
//! finish = "2026-01-28T17:00:00"
//! per_hour = "60m"
//!
//! [[cost]]
//! start = "2026-01-28T08:00:00"
//! finish = "2026-01-28T17:00:00"
//! per_hour = 50.0
//!
//! [[contoured]]
//! start = "2026-02-02T08:00:00"
//! duration = "5d"
//! work = "40h"
//! contour = "Bell"
//! ```

use calendar_core::calendar::Calendar;
use calendar_core::types::DateTimeRange;
use calendar_core::units::{Duration, TimeUnit};
use calendar_timephased::timephased::{
    contour_items, segment_cost, segment_work, Timephased, TimephasedCost, TimephasedWork,
    WorkContour,
};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

use super::{format_datetime, OutputFormat};
use crate::config::WorkcalConfig;
use crate::{CliError, Result};

#[derive(Debug, Deserialize)]
struct WorkRow {
    start: NaiveDateTime,
    finish: NaiveDateTime,
    #[serde(default)]
    per_hour: Option<String>,
    #[serde(default)]
    total: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CostRow {
    start: NaiveDateTime,
    finish: NaiveDateTime,
    per_hour: f64,
    #[serde(default)]
    total: f64,
}

#[derive(Debug, Deserialize)]
struct ContourRow {
    start: NaiveDateTime,
    duration: String,
    work: String,
    #[serde(default)]
    contour: WorkContour,
}

/// Contents of an items file
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ItemsFile {
    work: Vec<WorkRow>,
    cost: Vec<CostRow>,
    contoured: Vec<ContourRow>,
}

impl ItemsFile {
    /// Parse an items file from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| CliError::InvalidItems(e.to_string()))
    }

    /// Load an items file
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CliError::FileNotFound(path.display().to_string()));
        }
        Self::from_toml(&std::fs::read_to_string(path)?)
    }

    /// Work items sorted by start, contoured rows expanded
    pub fn work_items(&self, calendar: &Calendar) -> Result<Vec<TimephasedWork>> {
        let mut items = Vec::new();
        for row in &self.work {
            let item = match (&row.per_hour, &row.total) {
                (Some(per_hour), total) => {
                    let total = match total {
                        Some(total) => parse_duration(total)?,
                        None => Duration::zero(TimeUnit::Hours),
                    };
                    TimephasedWork::new(row.start, row.finish, total, parse_duration(per_hour)?)?
                }
                (None, Some(total)) => {
                    TimephasedWork::spread(calendar, row.start, row.finish, parse_duration(total)?)?
                }
                (None, None) => {
                    return Err(CliError::InvalidItems(format!(
                        "work item starting {} needs per_hour or total",
                        row.start
                    )))
                }
            };
            items.push(item);
        }
        for row in &self.contoured {
            items.extend(contour_items(
                calendar,
                row.start,
                parse_duration(&row.duration)?,
                parse_duration(&row.work)?,
                row.contour,
            )?);
        }
        items.sort_by_key(|item| item.start());
        Ok(items)
    }

    /// Cost items sorted by start
    pub fn cost_items(&self) -> Result<Vec<TimephasedCost>> {
        let mut items = self
            .cost
            .iter()
            .map(|row| TimephasedCost::new(row.start, row.finish, row.total, row.per_hour))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        items.sort_by_key(|item| item.start());
        Ok(items)
    }
}

fn parse_duration(s: &str) -> Result<Duration> {
    s.parse().map_err(CliError::InvalidItems)
}

#[derive(Debug, Serialize)]
struct SegmentRow {
    start: String,
    end: String,
    work: Option<f64>,
    cost: Option<f64>,
}

/// Run the segment command
pub fn run(
    config: &WorkcalConfig,
    calendar: Option<&str>,
    items: &Path,
    buckets: &[DateTimeRange],
    units: TimeUnit,
    format: OutputFormat,
) -> Result<()> {
    let calendar = config.calendar(calendar)?;
    let file = ItemsFile::from_file(items)?;
    info!(calendar = %calendar.name(), items = %items.display(), buckets = buckets.len(), "segmenting");
    print!("{}", render(&calendar, &file, buckets, units, format)?);
    Ok(())
}

/// One line per bucket with work in `units` and cost; `-` marks no data
pub fn render(
    calendar: &Calendar,
    file: &ItemsFile,
    buckets: &[DateTimeRange],
    units: TimeUnit,
    format: OutputFormat,
) -> Result<String> {
    let work_items = file.work_items(calendar)?;
    let cost_items = file.cost_items()?;
    debug!(work = work_items.len(), cost = cost_items.len(), "loaded items");

    let work = segment_work(calendar, &work_items, buckets, units)?;
    let cost = segment_cost(calendar, &cost_items, buckets)?;
    let rows: Vec<SegmentRow> = buckets
        .iter()
        .zip(work.into_iter().zip(cost))
        .map(|(bucket, (work, cost))| SegmentRow {
            start: format_datetime(bucket.start()),
            end: format_datetime(bucket.end()),
            work: work.map(|d| d.amount()),
            cost,
        })
        .collect();

    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&rows)? + "\n"),
        OutputFormat::Text => {
            let show = |value: Option<f64>| value.map_or_else(|| "-".to_string(), |v| format!("{v:.2}"));
            let mut out = format!("{:<16}  {:<16}  {:>10}  {:>10}\n", "start", "end", units.abbreviation(), "cost");
            for row in &rows {
                out.push_str(&format!(
                    "{:<16}  {:<16}  {:>10}  {:>10}\n",
                    row.start,
                    row.end,
                    show(row.work),
                    show(row.cost)
                ));
            }
            Ok(out)
        }
    }
}
