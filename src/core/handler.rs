//! Handlers: a sink plus a severity threshold and a formatter

use super::{
    color::{select_formatter, ColorChoice, ColorProbe, EnvColorProbe},
    error::Result,
    formatter::Formatter,
    log_entry::LogEntry,
    log_level::LogLevel,
    metrics::HandlerMetrics,
    sink::Sink,
};
use crate::sinks::NullSink;
use parking_lot::{Mutex, RwLock};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

static NEXT_HANDLER_ID: AtomicU64 = AtomicU64::new(1);

struct HandlerInner {
    id: u64,
    level: RwLock<LogLevel>,
    formatter: RwLock<Formatter>,
    sink: Mutex<Box<dyn Sink>>,
    file_backed: bool,
    placeholder: bool,
    metrics: HandlerMetrics,
}

/// A configured sink.
///
/// `Handler` is a shared handle: clones refer to the same underlying sink,
/// threshold and formatter, and equality is identity. The same handler may
/// be attached to several loggers.
#[derive(Clone)]
pub struct Handler {
    inner: Arc<HandlerInner>,
}

impl Handler {
    /// Wrap `sink` with no threshold and the plain formatter.
    pub fn new<S: Sink + 'static>(sink: S) -> Self {
        Self::from_boxed(Box::new(sink))
    }

    pub fn from_boxed(sink: Box<dyn Sink>) -> Self {
        Self::build(sink, false)
    }

    /// Handler that discards everything. Used as a placeholder so that a
    /// logger never looks handler-less while output is suppressed.
    pub fn null() -> Self {
        Self::build(Box::new(NullSink::new()), true)
    }

    fn build(sink: Box<dyn Sink>, placeholder: bool) -> Self {
        let file_backed = sink.is_file_backed();
        Self {
            inner: Arc::new(HandlerInner {
                id: NEXT_HANDLER_ID.fetch_add(1, Ordering::Relaxed),
                level: RwLock::new(LogLevel::NotSet),
                formatter: RwLock::new(Formatter::plain()),
                sink: Mutex::new(sink),
                file_backed,
                placeholder,
                metrics: HandlerMetrics::new(),
            }),
        }
    }

    /// Process-unique identifier
    pub fn id(&self) -> u64 {
        self.inner.id
    }

    pub fn level(&self) -> LogLevel {
        *self.inner.level.read()
    }

    pub fn set_level(&self, level: LogLevel) {
        *self.inner.level.write() = level;
    }

    pub fn formatter(&self) -> Formatter {
        self.inner.formatter.read().clone()
    }

    pub fn set_formatter(&self, formatter: Formatter) {
        *self.inner.formatter.write() = formatter;
    }

    pub fn is_file_backed(&self) -> bool {
        self.inner.file_backed
    }

    pub fn is_placeholder(&self) -> bool {
        self.inner.placeholder
    }

    pub fn metrics(&self) -> &HandlerMetrics {
        &self.inner.metrics
    }

    /// Formatter `select_formatter` would pick for this handler's sink
    pub fn default_formatter(&self, choice: ColorChoice, probe: &dyn ColorProbe) -> Formatter {
        let sink = self.inner.sink.lock();
        select_formatter(&**sink, choice, probe)
    }

    /// Render and write `entry` if it passes the handler threshold.
    ///
    /// Formatting and sink errors or panics are reported on stderr and
    /// counted; they never reach the caller.
    pub fn handle(&self, entry: &LogEntry) {
        if entry.level < self.level() {
            self.inner.metrics.record_filtered();
            return;
        }

        let formatter = self.formatter();
        let mut sink = self.inner.sink.lock();
        let write_result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let rendered = formatter.format(entry)?;
            sink.write(&rendered)
        }));

        match write_result {
            Ok(Ok(())) => {
                self.inner.metrics.record_emitted();
            }
            Ok(Err(e)) => {
                eprintln!("[LOGGER ERROR] Handler '{}' failed: {}", sink.name(), e);
                self.inner.metrics.record_failed();
            }
            Err(panic_info) => {
                let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                    s.to_string()
                } else if let Some(s) = panic_info.downcast_ref::<String>() {
                    s.clone()
                } else {
                    "Unknown panic".to_string()
                };
                eprintln!(
                    "[LOGGER CRITICAL] Handler '{}' panicked: {}. \
                     Other handlers continue to function.",
                    sink.name(),
                    panic_msg
                );
                self.inner.metrics.record_failed();
            }
        }
    }

    pub fn flush(&self) -> Result<()> {
        self.inner.sink.lock().flush()
    }
}

impl PartialEq for Handler {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Handler {}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handler")
            .field("id", &self.inner.id)
            .field("level", &self.level())
            .field("style", &self.inner.formatter.read().style())
            .field("file_backed", &self.inner.file_backed)
            .finish()
    }
}

/// Apply a formatter and threshold to `handler` and hand it back.
///
/// Without an explicit formatter one is selected from the sink kind:
/// file-backed sinks get the plain template, streams get color when the
/// environment supports it.
///
/// # Example
///
/// ```
/// use rust_library_logger::{configure_handler, sinks::MemorySink, Handler, LogLevel};
///
/// let handler = configure_handler(Handler::new(MemorySink::new()), None, LogLevel::Warning);
/// assert_eq!(handler.level(), LogLevel::Warning);
/// assert!(!handler.formatter().is_colored());
/// ```
pub fn configure_handler(handler: Handler, formatter: Option<Formatter>, level: LogLevel) -> Handler {
    configure_handler_with_probe(handler, formatter, level, &EnvColorProbe)
}

/// [`configure_handler`] with an explicit color probe
pub fn configure_handler_with_probe(
    handler: Handler,
    formatter: Option<Formatter>,
    level: LogLevel,
    probe: &dyn ColorProbe,
) -> Handler {
    handler.set_level(level);
    let formatter = formatter.unwrap_or_else(|| handler.default_formatter(ColorChoice::Auto, probe));
    handler.set_formatter(formatter);
    handler
}
