//! # Rust Library Logger
//!
//! Logging configuration for libraries. A library gets its own root logger
//! with one managed default handler, namespaced child loggers beneath it,
//! and scoped suppression of output that leaves caller-installed handlers
//! alone.
//!
//! ## Features
//!
//! - **Idempotent setup**: the default handler is created once per process,
//!   even under concurrent first use
//! - **Namespaced children**: child loggers are only handed out inside the
//!   library namespace
//! - **Scoped suppression**: RAII guards that restore handlers exactly, also
//!   when the guarded code panics
//! - **Safe formatting**: file sinks never receive color escape codes
//!
//! ```
//! use rust_library_logger::prelude::*;
//!
//! let logger = get_child_logger("rust_library_logger::net", true).unwrap();
//! logger.info("connected");
//!
//! let _quiet = suppress_default();
//! logger.warning("only custom handlers see this");
//! ```

pub mod core;
pub mod macros;
pub mod registry;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        configure_handler, ColorChoice, FormatStyle, Formatter, Handler, LogLevel, Logger,
        LoggerError, Result, Sink, TimestampFormat,
    };
    pub use crate::registry::global::{
        disable_default_handler, enable_default_handler, get_child_logger, get_root_logger,
        suppress_all, suppress_default,
    };
    pub use crate::registry::{Registry, RegistryBuilder};
}

pub use crate::core::{
    configure_handler, configure_handler_with_probe, create_default_formatter, select_formatter,
    ColorChoice, ColorProbe, EnvColorProbe, FormatStyle, Formatter, Handler, HandlerMetrics,
    Location, LogEntry, LogLevel, Logger, LoggerError, Result, Sink, TimestampFormat, CRITICAL,
    DEBUG, ERROR, INFO, NOTSET, WARNING,
};
pub use registry::global::{
    default_handler, disable_default_handler, enable_default_handler, get_child_logger,
    get_root_logger, registry, reset, suppress_all, suppress_default, with_all_suppressed,
    with_default_suppressed, LIBRARY_NAMESPACE,
};
pub use registry::{
    AllHandlerSuppression, DefaultHandlerSuppression, Registry, RegistryBuilder, SinkFactory,
    ENTRY_POINT_NAME,
};
