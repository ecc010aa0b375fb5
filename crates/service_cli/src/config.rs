//! CLI configuration management
//!
//! Loads calendar definitions and logging settings from a TOML file, then
//! applies environment and command-line overrides.

use calendar_core::calendar::{Calendar, CalendarBuilder, DayType};
use calendar_core::types::{CalendarError, TimeRange};
use calendar_core::units::CalendarProperties;
use chrono::{NaiveDate, Weekday};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Environment variable naming the configuration file.
pub const CONFIG_ENV: &str = "WORKCAL_CONFIG";

/// Environment variable overriding the log level.
pub const LOG_LEVEL_ENV: &str = "WORKCAL_LOG_LEVEL";

/// Name of the calendar available when the configuration defines none.
pub const BUILTIN_CALENDAR: &str = "Standard";

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Configuration file error: {0}")]
    FileError(String),

    #[error("Calendar '{0}' is defined more than once")]
    DuplicateCalendar(String),

    #[error("Calendar '{calendar}' derives from unknown calendar '{base}'")]
    UnknownBase { calendar: String, base: String },

    #[error("Calendars {0:?} derive from each other")]
    CyclicBase(Vec<String>),

    #[error("Calendar '{calendar}' has invalid {field} {value}")]
    InvalidProperty {
        calendar: String,
        field: &'static str,
        value: String,
    },

    #[error("Calendar '{calendar}' has invalid weekday '{day}'")]
    InvalidWeekday { calendar: String, day: String },

    #[error("Calendar '{calendar}': {source}")]
    Calendar {
        calendar: String,
        #[source]
        source: CalendarError,
    },

    #[error("Unknown calendar '{0}'")]
    UnknownCalendar(String),
}

/// Log levels supported by the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    #[default]
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

fn deserialize_log_level<'de, D>(deserializer: D) -> Result<LogLevel, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    LogLevel::from_str(&s).map_err(serde::de::Error::custom)
}

/// One weekday of a calendar definition
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DayDefinition {
    /// Explicit day type; days with hours default to working
    pub day_type: Option<DayType>,
    /// Working ranges such as "08:00-12:00"
    pub hours: Vec<TimeRange>,
}

/// A dated exception of a calendar definition
#[derive(Debug, Clone, Deserialize)]
pub struct ExceptionDefinition {
    /// Optional label, e.g. a holiday name
    #[serde(default)]
    pub name: Option<String>,
    /// First date covered
    pub from: NaiveDate,
    /// Last date covered; a single day when omitted
    #[serde(default)]
    pub to: Option<NaiveDate>,
    /// Replacement working ranges; none makes the dates non-working
    #[serde(default)]
    pub hours: Vec<TimeRange>,
}

/// Unit conventions of a calendar definition
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct PropertiesDefinition {
    pub hours_per_day: Option<f64>,
    pub hours_per_week: Option<f64>,
    pub days_per_month: Option<u32>,
}

impl PropertiesDefinition {
    fn resolve(&self, calendar: &str) -> Result<CalendarProperties, ConfigError> {
        let invalid = |field: &'static str, value: String| ConfigError::InvalidProperty {
            calendar: calendar.to_string(),
            field,
            value,
        };
        let mut properties = CalendarProperties::default();
        if let Some(hours) = self.hours_per_day {
            if !(0.0..=24.0).contains(&hours) {
                return Err(invalid("hours_per_day", hours.to_string()));
            }
            properties = properties.with_hours_per_day(hours);
        }
        if let Some(hours) = self.hours_per_week {
            if !(0.0..=168.0).contains(&hours) {
                return Err(invalid("hours_per_week", hours.to_string()));
            }
            properties = properties.with_hours_per_week(hours);
        }
        if let Some(days) = self.days_per_month {
            if days > 31 {
                return Err(invalid("days_per_month", days.to_string()));
            }
            properties = properties.with_days_per_month(days);
        }
        Ok(properties)
    }
}

/// A calendar as written in the configuration file
#[derive(Debug, Clone, Deserialize)]
pub struct CalendarDefinition {
    /// Unique calendar name
    pub name: String,
    /// Name of the calendar this one derives from
    #[serde(default)]
    pub base: Option<String>,
    /// Weekday definitions keyed by weekday name
    #[serde(default)]
    pub days: BTreeMap<String, DayDefinition>,
    /// Dated exceptions
    #[serde(default)]
    pub exceptions: Vec<ExceptionDefinition>,
    /// Unit conventions; inherited from the base when omitted
    #[serde(default)]
    pub properties: Option<PropertiesDefinition>,
}

impl CalendarDefinition {
    fn build(&self, base: Option<Arc<Calendar>>) -> Result<Calendar, ConfigError> {
        let mut builder = CalendarBuilder::new(&self.name);
        if let Some(base) = base {
            builder = builder.base(base);
        }
        for (day, definition) in &self.days {
            let weekday =
                Weekday::from_str(day).map_err(|_| ConfigError::InvalidWeekday {
                    calendar: self.name.clone(),
                    day: day.clone(),
                })?;
            for range in &definition.hours {
                builder = builder.hours(weekday, *range);
            }
            if let Some(day_type) = definition.day_type {
                builder = builder.day_type(weekday, day_type);
            }
        }
        for exception in &self.exceptions {
            let to = exception.to.unwrap_or(exception.from);
            builder = match (&exception.name, exception.hours.is_empty()) {
                (Some(name), true) => builder.holiday(name, exception.from, to),
                (None, true) => builder.non_working(exception.from, to),
                (_, false) => {
                    builder.working_exception(exception.from, to, exception.hours.iter().copied())
                }
            };
        }
        if let Some(properties) = &self.properties {
            builder = builder.properties(properties.resolve(&self.name)?);
        }
        builder.build().map_err(|source| ConfigError::Calendar {
            calendar: self.name.clone(),
            source,
        })
    }
}

/// CLI configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WorkcalConfig {
    /// Log level
    #[serde(deserialize_with = "deserialize_log_level")]
    pub log_level: LogLevel,
    /// Calendar used when a command names none
    pub default_calendar: Option<String>,
    /// Calendar definitions, in any order
    pub calendars: Vec<CalendarDefinition>,
}

impl WorkcalConfig {
    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::FileError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&content)
    }

    /// Apply environment variable overrides
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        if let Ok(level) = std::env::var(LOG_LEVEL_ENV) {
            self.log_level = LogLevel::from_str(&level)?;
        }
        Ok(())
    }

    /// Validate the configuration by building every calendar
    pub fn validate(&self) -> Result<(), ConfigError> {
        let calendars = self.calendars()?;
        if let Some(name) = &self.default_calendar {
            if !calendars.contains_key(name) {
                return Err(ConfigError::UnknownCalendar(name.clone()));
            }
        }
        Ok(())
    }

    /// Build every calendar, bases before the calendars deriving from them.
    ///
    /// Without definitions the built-in standard calendar is returned.
    pub fn calendars(&self) -> Result<BTreeMap<String, Arc<Calendar>>, ConfigError> {
        let mut pending: BTreeMap<&str, &CalendarDefinition> = BTreeMap::new();
        for definition in &self.calendars {
            if pending.insert(&definition.name, definition).is_some() {
                return Err(ConfigError::DuplicateCalendar(definition.name.clone()));
            }
        }
        for definition in &self.calendars {
            if let Some(base) = &definition.base {
                if !pending.contains_key(base.as_str()) {
                    return Err(ConfigError::UnknownBase {
                        calendar: definition.name.clone(),
                        base: base.clone(),
                    });
                }
            }
        }

        let mut built: BTreeMap<String, Arc<Calendar>> = BTreeMap::new();
        while !pending.is_empty() {
            let ready: Vec<&str> = pending
                .iter()
                .filter(|(_, definition)| match &definition.base {
                    Some(base) => built.contains_key(base),
                    None => true,
                })
                .map(|(name, _)| *name)
                .collect();
            if ready.is_empty() {
                return Err(ConfigError::CyclicBase(
                    pending.keys().map(|name| name.to_string()).collect(),
                ));
            }
            for name in ready {
                if let Some(definition) = pending.remove(name) {
                    let base = definition.base.as_ref().and_then(|b| built.get(b)).cloned();
                    let calendar = definition.build(base)?;
                    debug!(calendar = %name, "built calendar");
                    built.insert(name.to_string(), Arc::new(calendar));
                }
            }
        }

        if built.is_empty() {
            built.insert(
                BUILTIN_CALENDAR.to_string(),
                Arc::new(Calendar::standard(BUILTIN_CALENDAR)),
            );
        }
        Ok(built)
    }

    /// Look up a calendar by name, falling back to the default calendar
    pub fn calendar(&self, name: Option<&str>) -> Result<Arc<Calendar>, ConfigError> {
        let calendars = self.calendars()?;
        let requested = name.or(self.default_calendar.as_deref());
        let found = match requested {
            Some(name) => calendars.get(name),
            None if calendars.len() == 1 => calendars.values().next(),
            None => calendars.get(BUILTIN_CALENDAR),
        };
        found.cloned().ok_or_else(|| {
            ConfigError::UnknownCalendar(requested.unwrap_or(BUILTIN_CALENDAR).to_string())
        })
    }
}

/// CLI arguments relevant to configuration
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    /// Config file path
    pub config_file: Option<PathBuf>,
    /// Log level override
    pub log_level: Option<String>,
}

/// Build configuration from all sources
///
/// Priority (highest to lowest):
/// 1. CLI arguments
/// 2. Environment variables
/// 3. Config file (from `--config` or `WORKCAL_CONFIG`)
/// 4. Default values
pub fn build_config(cli: &CliArgs) -> Result<WorkcalConfig, ConfigError> {
    let path = cli
        .config_file
        .clone()
        .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));
    let mut config = match path {
        Some(path) => WorkcalConfig::from_file(&path)?,
        None => WorkcalConfig::default(),
    };

    config.apply_env()?;

    if let Some(level) = &cli.log_level {
        config.log_level = LogLevel::from_str(level)?;
    }

    Ok(config)
}
