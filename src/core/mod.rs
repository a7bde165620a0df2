//! Core logger types and traits

pub mod color;
pub mod error;
pub mod formatter;
pub mod handler;
pub mod log_entry;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod sink;

pub use color::{create_default_formatter, select_formatter, ColorChoice, ColorProbe, EnvColorProbe};
pub use error::{LoggerError, Result};
pub use formatter::{FormatStyle, Formatter, TimestampFormat};
pub use handler::{configure_handler, configure_handler_with_probe, Handler};
pub use log_entry::{LogEntry, Location};
pub use log_level::{LogLevel, CRITICAL, DEBUG, ERROR, INFO, NOTSET, WARNING};
pub use logger::{Logger, NAME_SEPARATOR};
pub use metrics::HandlerMetrics;
pub use sink::Sink;
