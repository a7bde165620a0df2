//! Log level definitions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Ordered severity levels.
///
/// `NotSet` is not a severity of its own: on a logger it means "inherit from
/// the parent", on a handler it means "no filtering beyond the logger".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[derive(Default)]
pub enum LogLevel {
    #[default]
    NotSet = 0,
    Debug = 10,
    Info = 20,
    Warning = 30,
    Error = 40,
    Critical = 50,
}

pub const NOTSET: LogLevel = LogLevel::NotSet;
pub const DEBUG: LogLevel = LogLevel::Debug;
pub const INFO: LogLevel = LogLevel::Info;
pub const WARNING: LogLevel = LogLevel::Warning;
pub const ERROR: LogLevel = LogLevel::Error;
pub const CRITICAL: LogLevel = LogLevel::Critical;

impl LogLevel {
    pub fn to_str(&self) -> &'static str {
        match self {
            LogLevel::NotSet => "NOTSET",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
            LogLevel::Critical => "CRITICAL",
        }
    }

    /// Numeric value of the level
    pub fn value(&self) -> u8 {
        *self as u8
    }

    pub fn is_set(&self) -> bool {
        *self != LogLevel::NotSet
    }

    #[cfg(feature = "console")]
    pub fn color_code(&self) -> colored::Color {
        use colored::Color::*;
        match self {
            LogLevel::NotSet => White,
            LogLevel::Debug => Cyan,
            LogLevel::Info => Green,
            LogLevel::Warning => Yellow,
            LogLevel::Error => Red,
            LogLevel::Critical => BrightRed,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "NOTSET" => Ok(LogLevel::NotSet),
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "WARNING" | "WARN" => Ok(LogLevel::Warning),
            "ERROR" => Ok(LogLevel::Error),
            "CRITICAL" | "FATAL" => Ok(LogLevel::Critical),
            _ => Err(format!("Invalid log level: '{}'", s)),
        }
    }
}
