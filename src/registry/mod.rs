//! Root logger registry
//!
//! A [`Registry`] owns a library's root logger and the single default
//! handler attached to it. It starts unconfigured; the first call that needs
//! the root logger configures it exactly once:
//!
//! - a default handler is built around the configured sink (stderr unless
//!   overridden) and attached to the root logger,
//! - the root threshold is set to `Info`,
//! - propagation out of the root is turned off.
//!
//! The check and the configuration happen under one lock, so concurrent
//! first calls install exactly one handler.

pub mod global;
pub mod namespace;
pub mod suppress;

use crate::core::{
    configure_handler_with_probe, ColorChoice, ColorProbe, EnvColorProbe, Handler, LogLevel,
    Logger, LoggerError, Result, Sink, TimestampFormat, NAME_SEPARATOR,
};
use crate::sinks::StreamSink;
use parking_lot::Mutex;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

pub use namespace::ENTRY_POINT_NAME;
pub use suppress::{AllHandlerSuppression, DefaultHandlerSuppression};

/// Produces the sink for a new default handler
pub type SinkFactory = Arc<dyn Fn() -> Box<dyn Sink> + Send + Sync>;

struct RegistryConfig {
    sink_factory: SinkFactory,
    root_level: LogLevel,
    handler_level: LogLevel,
    color: ColorChoice,
    timestamp_format: TimestampFormat,
    probe: Arc<dyn ColorProbe>,
}

pub struct Registry {
    namespace: String,
    root: Logger,
    default_slot: Mutex<Option<Handler>>,
    reset_epoch: AtomicU64,
    config: RegistryConfig,
}

impl Registry {
    /// Registry for `namespace` with the default configuration
    pub fn new(namespace: impl Into<String>) -> Result<Self> {
        RegistryBuilder::new(namespace).build()
    }

    #[must_use]
    pub fn builder(namespace: impl Into<String>) -> RegistryBuilder {
        RegistryBuilder::new(namespace)
    }

    /// Top-level namespace segment; also the root logger's name
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Whether the default handler has been created
    pub fn is_configured(&self) -> bool {
        self.default_slot.lock().is_some()
    }

    /// Configure the root logger unless already done.
    pub fn ensure_configured(&self) {
        let mut slot = self.default_slot.lock();
        self.configure_locked(&mut slot);
    }

    fn configure_locked(&self, slot: &mut Option<Handler>) -> Handler {
        if let Some(handler) = slot.as_ref() {
            return handler.clone();
        }

        let handler = self.create_default_handler();
        self.root.add_handler(handler.clone());
        self.root.set_level(self.config.root_level);
        self.root.set_propagate(false);
        *slot = Some(handler.clone());
        handler
    }

    fn create_default_handler(&self) -> Handler {
        let probe = self.config.probe.as_ref();
        let handler = Handler::from_boxed((self.config.sink_factory)());
        let formatter = match self.config.color {
            ColorChoice::Auto => None,
            choice => Some(handler.default_formatter(choice, probe)),
        };
        let handler = configure_handler_with_probe(handler, formatter, self.config.handler_level, probe);

        if self.config.timestamp_format != TimestampFormat::default() {
            handler.set_formatter(
                handler
                    .formatter()
                    .with_timestamp_format(self.config.timestamp_format.clone()),
            );
        }
        handler
    }

    /// The library root logger, configured on first access
    pub fn get_root_logger(&self) -> Logger {
        self.ensure_configured();
        self.root.clone()
    }

    /// The default handler, creating it on first access
    pub fn default_handler(&self) -> Handler {
        let mut slot = self.default_slot.lock();
        self.configure_locked(&mut slot)
    }

    /// Re-attach the default handler. No-op if it is already attached.
    pub fn enable_default_handler(&self) {
        let handler = self.default_handler();
        self.root.add_handler(handler);
    }

    /// Detach the default handler. No-op if it is not attached.
    pub fn disable_default_handler(&self) {
        let handler = self.default_handler();
        self.root.remove_handler(&handler);
    }

    /// Drop the default handler and every handler on the root logger, then
    /// configure from scratch. Meant for test isolation.
    ///
    /// A reset ends any suppression still in effect: guards created before
    /// it leave the fresh root handlers alone when they are dropped, and do
    /// not bring back the handlers they had detached.
    pub fn reset(&self) {
        let mut slot = self.default_slot.lock();
        self.reset_epoch.fetch_add(1, Ordering::SeqCst);
        *slot = None;
        self.root.clear_handlers();
        self.root.set_level(LogLevel::NotSet);
        self.root.set_propagate(true);
        self.configure_locked(&mut slot);
    }

    pub(crate) fn reset_epoch(&self) -> u64 {
        self.reset_epoch.load(Ordering::SeqCst)
    }

    /// Suppress the default handler until the guard is dropped
    pub fn suppress_default(&self) -> DefaultHandlerSuppression<'_> {
        DefaultHandlerSuppression::enter(self)
    }

    /// Suppress every root handler until the guard is dropped
    pub fn suppress_all(&self) -> AllHandlerSuppression<'_> {
        AllHandlerSuppression::enter(self)
    }

    /// Run `f` with the default handler suppressed
    pub fn with_default_suppressed<R>(&self, f: impl FnOnce() -> R) -> R {
        let _guard = self.suppress_default();
        f()
    }

    /// Run `f` with every root handler suppressed
    pub fn with_all_suppressed<R>(&self, f: impl FnOnce() -> R) -> R {
        let _guard = self.suppress_all();
        f()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("namespace", &self.namespace)
            .field("configured", &self.is_configured())
            .field("root", &self.root)
            .finish()
    }
}

/// Builder for constructing a [`Registry`] with a fluent API
///
/// # Example
/// ```
/// use rust_library_logger::prelude::*;
/// use rust_library_logger::sinks::MemorySink;
///
/// let sink = MemorySink::new();
/// let capture = sink.clone();
/// let registry = Registry::builder("mylib")
///     .root_level(LogLevel::Debug)
///     .default_sink(move || Box::new(capture.clone()))
///     .build()
///     .unwrap();
///
/// registry.get_root_logger().debug("visible");
/// assert_eq!(sink.lines().len(), 1);
/// ```
pub struct RegistryBuilder {
    namespace: String,
    sink_factory: SinkFactory,
    root_level: LogLevel,
    handler_level: LogLevel,
    color: ColorChoice,
    timestamp_format: TimestampFormat,
    probe: Arc<dyn ColorProbe>,
}

impl RegistryBuilder {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            sink_factory: Arc::new(|| -> Box<dyn Sink> { Box::new(StreamSink::stderr()) }),
            root_level: LogLevel::Info,
            handler_level: LogLevel::NotSet,
            color: ColorChoice::Auto,
            timestamp_format: TimestampFormat::default(),
            probe: Arc::new(EnvColorProbe),
        }
    }

    /// Sink used for the default handler (stderr by default)
    #[must_use = "builder methods return a new value"]
    pub fn default_sink<F>(mut self, factory: F) -> Self
    where
        F: Fn() -> Box<dyn Sink> + Send + Sync + 'static,
    {
        self.sink_factory = Arc::new(factory);
        self
    }

    /// Root logger threshold applied on configuration (`Info` by default)
    #[must_use = "builder methods return a new value"]
    pub fn root_level(mut self, level: LogLevel) -> Self {
        self.root_level = level;
        self
    }

    /// Threshold of the default handler (`NotSet` by default)
    #[must_use = "builder methods return a new value"]
    pub fn handler_level(mut self, level: LogLevel) -> Self {
        self.handler_level = level;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn color(mut self, choice: ColorChoice) -> Self {
        self.color = choice;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn color_probe<P: ColorProbe + 'static>(mut self, probe: P) -> Self {
        self.probe = Arc::new(probe);
        self
    }

    /// Build the registry; the root logger stays unconfigured until first use.
    pub fn build(self) -> Result<Registry> {
        if self.namespace.is_empty() {
            return Err(LoggerError::config("RegistryBuilder", "namespace must not be empty"));
        }
        if self.namespace.contains(NAME_SEPARATOR) || self.namespace.contains("::") {
            return Err(LoggerError::config(
                "RegistryBuilder",
                format!(
                    "namespace '{}' must be a single top-level segment",
                    self.namespace
                ),
            ));
        }
        if !self.timestamp_format.is_valid() {
            return Err(LoggerError::config(
                "RegistryBuilder",
                format!("unknown strftime directive in {:?}", self.timestamp_format),
            ));
        }
        Ok(self.build_unchecked())
    }

    pub(crate) fn build_unchecked(self) -> Registry {
        Registry {
            root: Logger::new(self.namespace.clone()),
            namespace: self.namespace,
            default_slot: Mutex::new(None),
            reset_epoch: AtomicU64::new(0),
            config: RegistryConfig {
                sink_factory: self.sink_factory,
                root_level: self.root_level,
                handler_level: self.handler_level,
                color: self.color,
                timestamp_format: self.timestamp_format,
                probe: self.probe,
            },
        }
    }
}
