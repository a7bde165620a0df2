//! Logging macros that record the call site.
//!
//! Each macro formats its arguments like `format!` and passes the file,
//! line and module path of the invocation along with the record.
//!
//! # Examples
//!
//! ```
//! use rust_library_logger::prelude::*;
//! use rust_library_logger::{info, warning};
//!
//! let logger = get_root_logger();
//!
//! info!(logger, "Server started");
//! let port = 8080;
//! warning!(logger, "Port {} already in use, retrying", port);
//! ```

/// Log a message at an explicit level.
///
/// # Examples
///
/// ```
/// # use rust_library_logger::prelude::*;
/// # let logger = Logger::new("mylib");
/// use rust_library_logger::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log_at(
            $level,
            format!($($arg)+),
            &$crate::Location::new(file!(), line!(), module_path!()),
        )
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
///
/// # Examples
///
/// ```
/// # use rust_library_logger::prelude::*;
/// # let logger = Logger::new("mylib");
/// use rust_library_logger::warning;
/// warning!(logger, "Low disk space");
/// warning!(logger, "Retry attempt {} of {}", 3, 5);
/// ```
#[macro_export]
macro_rules! warning {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warning, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log a critical-level message.
#[macro_export]
macro_rules! critical {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Critical, $($arg)+)
    };
}

/// Child logger of the process-wide registry for the calling module.
///
/// Panics if the calling module is outside this library's namespace.
#[macro_export]
macro_rules! module_logger {
    () => {
        $crate::get_child_logger(module_path!(), true)
            .expect("module_logger! used outside the library namespace")
    };
}
