//! Process-wide registry for this library's own loggers
//!
//! The registry is created lazily on first use and lives for the rest of the
//! process; [`reset`] is the only way back to a fresh configuration.

use super::{AllHandlerSuppression, DefaultHandlerSuppression, Registry, RegistryBuilder};
use crate::core::{Handler, Logger, Result};
use once_cell::sync::Lazy;

/// Top-level namespace of this library's loggers
pub const LIBRARY_NAMESPACE: &str = env!("CARGO_CRATE_NAME");

static REGISTRY: Lazy<Registry> = Lazy::new(|| RegistryBuilder::new(LIBRARY_NAMESPACE).build_unchecked());

/// The process-wide registry
pub fn registry() -> &'static Registry {
    &REGISTRY
}

/// The library root logger, configured on first access
pub fn get_root_logger() -> Logger {
    REGISTRY.get_root_logger()
}

/// Logger for `name` (typically `module_path!()`) beneath the root logger
///
/// # Example
/// ```
/// use rust_library_logger::get_child_logger;
///
/// let logger = get_child_logger("rust_library_logger::worker", true).unwrap();
/// assert_eq!(logger.name(), "rust_library_logger.worker");
/// assert!(get_child_logger("some_other_crate::worker", true).is_err());
/// ```
pub fn get_child_logger(name: &str, propagate: bool) -> Result<Logger> {
    REGISTRY.get_child_logger(name, propagate)
}

pub fn default_handler() -> Handler {
    REGISTRY.default_handler()
}

pub fn enable_default_handler() {
    REGISTRY.enable_default_handler();
}

pub fn disable_default_handler() {
    REGISTRY.disable_default_handler();
}

/// Reconfigure the root logger from scratch; for test isolation only
pub fn reset() {
    REGISTRY.reset();
}

/// Suppress the default handler until the returned guard is dropped
///
/// # Example
/// ```
/// use rust_library_logger::{get_root_logger, suppress_default};
///
/// let logger = get_root_logger();
/// {
///     let _quiet = suppress_default();
///     logger.warning("not printed to stderr");
/// }
/// logger.warning("printed again");
/// ```
pub fn suppress_default() -> DefaultHandlerSuppression<'static> {
    REGISTRY.suppress_default()
}

/// Suppress every root handler until the returned guard is dropped
pub fn suppress_all() -> AllHandlerSuppression<'static> {
    REGISTRY.suppress_all()
}

pub fn with_default_suppressed<R>(f: impl FnOnce() -> R) -> R {
    REGISTRY.with_default_suppressed(f)
}

pub fn with_all_suppressed<R>(f: impl FnOnce() -> R) -> R {
    REGISTRY.with_all_suppressed(f)
}
