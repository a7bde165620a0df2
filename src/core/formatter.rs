//! Record formatters
//!
//! A [`Formatter`] turns a [`LogEntry`] into one line of text. The text
//! template is
//!
//! ```text
//! <timestamp> - <logger name>:<line>[<LEVEL>] - <message>
//! ```
//!
//! The colored style wraps only the `[<LEVEL>]` token in an ANSI color and a
//! reset; everything else is identical to the plain style.

use super::error::Result;
use super::log_entry::LogEntry;
use super::log_level::LogLevel;
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// Timestamp rendering options
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// Local-style `2025-01-08 10:30:45,123` (UTC)
    #[default]
    Asctime,

    /// ISO 8601 with milliseconds: `2025-01-08T10:30:45.123Z`
    Iso8601,

    /// RFC 3339 format: `2025-01-08T10:30:45.123456+00:00`
    Rfc3339,

    /// Custom strftime format
    Custom(String),
}

impl TimestampFormat {
    /// Whether every directive of a custom pattern is a known strftime item
    pub fn is_valid(&self) -> bool {
        match self {
            TimestampFormat::Custom(format_str) => {
                !StrftimeItems::new(format_str).any(|item| matches!(item, Item::Error))
            }
            _ => true,
        }
    }

    /// Render `datetime`. A custom pattern that fails to render falls back
    /// to [`TimestampFormat::Asctime`].
    #[must_use]
    pub fn format(&self, datetime: &DateTime<Utc>) -> String {
        match self {
            TimestampFormat::Asctime => datetime.format("%Y-%m-%d %H:%M:%S,%3f").to_string(),
            TimestampFormat::Iso8601 => datetime.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
            TimestampFormat::Rfc3339 => datetime.to_rfc3339(),
            TimestampFormat::Custom(format_str) => {
                let mut rendered = String::new();
                match write!(rendered, "{}", datetime.format(format_str)) {
                    Ok(()) => rendered,
                    Err(_) => TimestampFormat::Asctime.format(datetime),
                }
            }
        }
    }
}

/// Rendering style of a formatter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormatStyle {
    #[default]
    Plain,
    /// Plain template with an ANSI-colored level token
    Colored,
    /// One JSON object per line
    Json,
}

/// Immutable rendering template
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Formatter {
    style: FormatStyle,
    timestamp_format: TimestampFormat,
}

impl Formatter {
    pub fn new(style: FormatStyle) -> Self {
        Self {
            style,
            timestamp_format: TimestampFormat::default(),
        }
    }

    pub fn plain() -> Self {
        Self::new(FormatStyle::Plain)
    }

    pub fn colored() -> Self {
        Self::new(FormatStyle::Colored)
    }

    pub fn json() -> Self {
        Self::new(FormatStyle::Json)
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    pub fn style(&self) -> FormatStyle {
        self.style
    }

    pub fn timestamp_format(&self) -> &TimestampFormat {
        &self.timestamp_format
    }

    pub fn is_colored(&self) -> bool {
        self.style == FormatStyle::Colored
    }

    /// Render `entry` as one line.
    ///
    /// # Errors
    ///
    /// [`LoggerError::JsonError`](super::error::LoggerError::JsonError) if the
    /// JSON style fails to serialize the record.
    pub fn format(&self, entry: &LogEntry) -> Result<String> {
        match self.style {
            FormatStyle::Plain => Ok(self.format_text(entry, false)),
            FormatStyle::Colored => Ok(self.format_text(entry, true)),
            FormatStyle::Json => self.format_json(entry),
        }
    }

    fn format_text(&self, entry: &LogEntry, colored: bool) -> String {
        let timestamp_str = self.timestamp_format.format(&entry.timestamp);
        let location = match entry.line {
            Some(line) => format!("{}:{}", entry.name, line),
            None => entry.name.clone(),
        };
        let level_token = format!("[{}]", entry.level.to_str());
        let level_str = if colored {
            paint_level(entry.level, &level_token)
        } else {
            level_token
        };

        format!(
            "{} - {}{} - {}",
            timestamp_str, location, level_str, entry.message
        )
    }

    fn format_json(&self, entry: &LogEntry) -> Result<String> {
        let mut json_obj = serde_json::Map::new();

        json_obj.insert(
            "timestamp".to_string(),
            serde_json::Value::String(self.timestamp_format.format(&entry.timestamp)),
        );
        json_obj.insert(
            "name".to_string(),
            serde_json::Value::String(entry.name.clone()),
        );
        json_obj.insert(
            "level".to_string(),
            serde_json::Value::String(entry.level.to_str().to_string()),
        );
        json_obj.insert(
            "message".to_string(),
            serde_json::Value::String(entry.message.clone()),
        );

        if let Some(ref file) = entry.file {
            json_obj.insert("file".to_string(), serde_json::Value::String(file.clone()));
        }
        if let Some(line) = entry.line {
            json_obj.insert("line".to_string(), serde_json::Value::Number(line.into()));
        }
        if let Some(ref module_path) = entry.module_path {
            json_obj.insert(
                "module_path".to_string(),
                serde_json::Value::String(module_path.clone()),
            );
        }

        let thread = entry.thread_name.as_ref().unwrap_or(&entry.thread_id);
        json_obj.insert(
            "thread".to_string(),
            serde_json::Value::String(thread.clone()),
        );

        Ok(serde_json::to_string(&serde_json::Value::Object(json_obj))?)
    }
}

// Escapes are written directly instead of through `colored::Colorize`, which
// applies its own stdout tty and CLICOLOR checks. Whether to color is decided
// by `select_formatter` for the handler's actual sink.
#[cfg(feature = "console")]
fn paint_level(level: LogLevel, token: &str) -> String {
    format!("\x1b[{}m{}\x1b[0m", level.color_code().to_fg_str(), token)
}

#[cfg(not(feature = "console"))]
fn paint_level(_level: LogLevel, token: &str) -> String {
    token.to_string()
}
