//! Log entry structure

use super::log_level::LogLevel;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;

// Thread-local caches for thread information to avoid repeated allocations
thread_local! {
    static THREAD_ID_CACHE: RefCell<Option<String>> = const { RefCell::new(None) };
    static THREAD_NAME_CACHE: RefCell<Option<Option<String>>> = const { RefCell::new(None) };
}

fn get_thread_id() -> String {
    THREAD_ID_CACHE.with(|cache| {
        cache
            .borrow_mut()
            .get_or_insert_with(|| format!("{:?}", std::thread::current().id()))
            .clone()
    })
}

fn get_thread_name() -> Option<String> {
    THREAD_NAME_CACHE.with(|cache| {
        cache
            .borrow_mut()
            .get_or_insert_with(|| std::thread::current().name().map(String::from))
            .clone()
    })
}

/// Source location of a logging call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub file: String,
    pub line: u32,
    pub module_path: String,
}

impl Location {
    pub fn new(file: &str, line: u32, module_path: &str) -> Self {
        Self {
            file: file.to_string(),
            line,
            module_path: module_path.to_string(),
        }
    }
}

/// A single record travelling through the logger hierarchy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    /// Dotted name of the logger that created the record
    pub name: String,
    pub level: LogLevel,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub file: Option<String>,
    pub line: Option<u32>,
    pub module_path: Option<String>,
    pub thread_id: String,
    pub thread_name: Option<String>,
}

impl LogEntry {
    /// Sanitize log message to prevent log injection attacks
    ///
    /// Replaces newlines, carriage returns, and tabs with escape sequences
    /// to prevent attackers from injecting fake log entries.
    fn sanitize_message(message: &str) -> String {
        message
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }

    pub fn new(name: impl Into<String>, level: LogLevel, message: impl AsRef<str>) -> Self {
        Self {
            name: name.into(),
            level,
            message: Self::sanitize_message(message.as_ref()),
            timestamp: Utc::now(),
            file: None,
            line: None,
            module_path: None,
            thread_id: get_thread_id(),
            thread_name: get_thread_name(),
        }
    }

    pub fn with_location(mut self, location: &Location) -> Self {
        self.file = Some(location.file.clone());
        self.line = Some(location.line);
        self.module_path = Some(location.module_path.clone());
        self
    }
}
