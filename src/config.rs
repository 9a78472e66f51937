//! Settings and events loaded from a TOML file
use crate::calendar::{Calendar, Highlight};
use crate::dates::parse_date;
use crate::error::CalendarError;
use crate::html::ClassNames;
use crate::week::WeekStart;
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use time::Date;

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// First column of the grid: 0-6 (Sunday = 0) or a weekday name
    #[serde(default)]
    pub week_start: Option<WeekStartSetting>,

    /// Seven weekday labels, Sunday first
    #[serde(default)]
    pub day_names: Option<Vec<String>>,

    /// Twelve month names, January first
    #[serde(default)]
    pub month_names: Option<Vec<String>>,

    /// "auto", "none", or a date
    #[serde(default)]
    pub highlight: Option<String>,

    #[serde(default)]
    pub classes: ClassNames,

    #[serde(default)]
    pub events: Vec<EventEntry>,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(untagged)]
pub enum WeekStartSetting {
    Index(i64),
    Name(String),
}

impl WeekStartSetting {
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidOffset`] if a name is not a weekday.
    pub fn resolve(&self) -> Result<WeekStart, CalendarError> {
        match self {
            WeekStartSetting::Index(n) => Ok(WeekStart::from_index(*n)),
            WeekStartSetting::Name(s) => s.parse(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct EventEntry {
    pub content: String,
    pub start: String,
    #[serde(default)]
    pub end: Option<String>,
    /// Markup shown after the content
    #[serde(default)]
    pub details: Option<String>,
}

impl Config {
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid
    /// configuration.
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        let src = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;
        let config = toml::from_str::<Config>(&src).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source,
        })?;
        tracing::info!(path = %path.display(), events = config.events.len(), "loaded configuration");
        Ok(config)
    }

    /// Apply the settings to `cal` and add the configured events.
    /// Relative dates ("today", "October 30", ...) are resolved against
    /// `today`.
    ///
    /// # Errors
    ///
    /// Returns the first invalid setting or event encountered.
    pub fn apply(&self, cal: &mut Calendar, today: Date) -> Result<(), CalendarError> {
        if let Some(ws) = &self.week_start {
            cal.set_week_start(ws.resolve()?);
        }
        if let Some(names) = &self.day_names {
            cal.set_day_names(Some(names.clone()))?;
        }
        if let Some(names) = &self.month_names {
            cal.set_month_names(Some(names.clone()))?;
        }
        if let Some(hl) = &self.highlight {
            cal.set_highlight(parse_highlight(hl, today)?);
        }
        for ev in &self.events {
            let start = parse_date(&ev.start, today)?;
            let end = ev
                .end
                .as_deref()
                .map(|s| parse_date(s, today))
                .transpose()?;
            cal.add_event_with_details(ev.content.as_str(), ev.details.as_deref(), start, end)?;
        }
        Ok(())
    }
}

/// Parse a highlight setting: "auto", "none", or a date
///
/// # Errors
///
/// Returns [`CalendarError::InvalidDate`] for anything else.
pub fn parse_highlight(s: &str, today: Date) -> Result<Highlight, CalendarError> {
    match s.trim().to_ascii_lowercase().as_str() {
        "auto" => Ok(Highlight::Auto),
        "none" | "off" => Ok(Highlight::Disabled),
        _ => parse_date(s, today).map(Highlight::Date),
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
