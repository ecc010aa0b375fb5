//! CLI error types

use calendar_core::types::CalendarError;
use calendar_timephased::timephased::SegmentError;
use calendar_timephased::timescale::TimescaleError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by CLI commands
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Calendar error: {0}")]
    Calendar(#[from] CalendarError),

    #[error("Timescale error: {0}")]
    Timescale(#[from] TimescaleError),

    #[error("Segmentation error: {0}")]
    Segment(#[from] SegmentError),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Invalid items file: {0}")]
    InvalidItems(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias for CLI commands
pub type Result<T> = std::result::Result<T, CliError>;
