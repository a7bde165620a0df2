//! Hierarchical logger nodes
//!
//! A [`Logger`] is one node of a dotted-name tree. Records created on a node
//! are offered to the node's handlers and, while propagation is enabled, to
//! the handlers of each ancestor in turn.

use super::{
    error::Result,
    handler::Handler,
    log_entry::{LogEntry, Location},
    log_level::LogLevel,
};
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

/// Separator between the segments of a logger name
pub const NAME_SEPARATOR: char = '.';

struct LoggerNode {
    name: String,
    parent: Weak<LoggerNode>,
    level: RwLock<LogLevel>,
    handlers: RwLock<Vec<Handler>>,
    propagate: AtomicBool,
    warned_no_handlers: AtomicBool,
    children: Mutex<HashMap<String, Logger>>,
}

/// Handle to a node in the logger tree.
///
/// Clones share the node; equality is identity. Parents own their children,
/// so a child handle outliving the whole tree simply stops propagating.
#[derive(Clone)]
pub struct Logger {
    node: Arc<LoggerNode>,
}

impl Logger {
    /// Create a detached top-level node
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_parent(name.into(), Weak::new())
    }

    fn with_parent(name: String, parent: Weak<LoggerNode>) -> Self {
        Self {
            node: Arc::new(LoggerNode {
                name,
                parent,
                level: RwLock::new(LogLevel::NotSet),
                handlers: RwLock::new(Vec::new()),
                propagate: AtomicBool::new(true),
                warned_no_handlers: AtomicBool::new(false),
                children: Mutex::new(HashMap::new()),
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.node.name
    }

    pub fn parent(&self) -> Option<Logger> {
        self.node.parent.upgrade().map(|node| Logger { node })
    }

    /// Return the descendant at `suffix` (dotted, relative to this node),
    /// creating any missing intermediate nodes.
    pub fn get_child(&self, suffix: &str) -> Logger {
        suffix
            .split(NAME_SEPARATOR)
            .filter(|segment| !segment.is_empty())
            .fold(self.clone(), |current, segment| current.direct_child(segment))
    }

    fn direct_child(&self, segment: &str) -> Logger {
        let mut children = self.node.children.lock();
        children
            .entry(segment.to_string())
            .or_insert_with(|| {
                Logger::with_parent(
                    format!("{}{}{}", self.node.name, NAME_SEPARATOR, segment),
                    Arc::downgrade(&self.node),
                )
            })
            .clone()
    }

    /// Own threshold; `NotSet` means inherited
    pub fn level(&self) -> LogLevel {
        *self.node.level.read()
    }

    pub fn set_level(&self, level: LogLevel) {
        *self.node.level.write() = level;
    }

    /// First threshold set on this node or an ancestor
    pub fn effective_level(&self) -> LogLevel {
        let mut current = Some(self.clone());
        while let Some(logger) = current {
            let level = logger.level();
            if level.is_set() {
                return level;
            }
            current = logger.parent();
        }
        LogLevel::NotSet
    }

    pub fn is_enabled_for(&self, level: LogLevel) -> bool {
        level >= self.effective_level()
    }

    pub fn propagate(&self) -> bool {
        self.node.propagate.load(Ordering::Acquire)
    }

    pub fn set_propagate(&self, propagate: bool) {
        self.node.propagate.store(propagate, Ordering::Release);
    }

    /// Snapshot of the attached handlers in insertion order
    pub fn handlers(&self) -> Vec<Handler> {
        self.node.handlers.read().clone()
    }

    pub fn handler_count(&self) -> usize {
        self.node.handlers.read().len()
    }

    pub fn contains_handler(&self, handler: &Handler) -> bool {
        self.node.handlers.read().contains(handler)
    }

    /// Attach `handler`. Attaching an already attached handler is a no-op.
    pub fn add_handler(&self, handler: Handler) {
        let mut handlers = self.node.handlers.write();
        if !handlers.contains(&handler) {
            handlers.push(handler);
        }
    }

    /// Detach `handler`. Detaching an absent handler is a no-op.
    pub fn remove_handler(&self, handler: &Handler) {
        self.node.handlers.write().retain(|attached| attached != handler);
    }

    /// Detach every handler, returning them in insertion order
    pub fn clear_handlers(&self) -> Vec<Handler> {
        std::mem::take(&mut *self.node.handlers.write())
    }

    /// Whether any handler would see a record from this node
    pub fn has_handlers(&self) -> bool {
        let mut current = Some(self.clone());
        while let Some(logger) = current {
            if logger.handler_count() > 0 {
                return true;
            }
            if !logger.propagate() {
                break;
            }
            current = logger.parent();
        }
        false
    }

    pub fn log(&self, level: LogLevel, message: impl AsRef<str>) {
        if !self.is_enabled_for(level) {
            return;
        }
        self.dispatch(&LogEntry::new(self.name(), level, message));
    }

    pub fn log_at(&self, level: LogLevel, message: impl AsRef<str>, location: &Location) {
        if !self.is_enabled_for(level) {
            return;
        }
        self.dispatch(&LogEntry::new(self.name(), level, message).with_location(location));
    }

    pub fn debug(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Debug, message);
    }

    pub fn info(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Info, message);
    }

    pub fn warning(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Warning, message);
    }

    pub fn error(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Error, message);
    }

    pub fn critical(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Critical, message);
    }

    /// Offer `entry` to this node's handlers and, while propagating, to
    /// each ancestor's.
    pub fn dispatch(&self, entry: &LogEntry) {
        let mut found = 0usize;
        let mut current = Some(self.clone());

        while let Some(logger) = current {
            // Snapshot so handlers can be (de)attached from inside a sink.
            let handlers = logger.handlers();
            found += handlers.len();
            for handler in &handlers {
                handler.handle(entry);
            }
            if !logger.propagate() {
                break;
            }
            current = logger.parent();
        }

        if found == 0 && !self.node.warned_no_handlers.swap(true, Ordering::AcqRel) {
            eprintln!(
                "[LOGGER WARNING] No handlers could be found for logger \"{}\"",
                self.name()
            );
        }
    }

    /// Flush every handler attached to this node
    pub fn flush(&self) -> Result<()> {
        for handler in self.handlers() {
            handler.flush()?;
        }
        Ok(())
    }
}

impl PartialEq for Logger {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.node, &other.node)
    }
}

impl Eq for Logger {}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.node.name)
            .field("level", &self.level())
            .field("propagate", &self.propagate())
            .field("handlers", &self.handler_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sinks::MemorySink;

    fn capture(logger: &Logger) -> MemorySink {
        let sink = MemorySink::new();
        logger.add_handler(Handler::new(sink.clone()));
        sink
    }

    #[test]
    fn test_child_names() {
        let root = Logger::new("lib");
        let child = root.get_child("a.b");
        assert_eq!(child.name(), "lib.a.b");
        assert_eq!(child.parent().map(|p| p.name().to_string()), Some("lib.a".to_string()));
        assert_eq!(root.get_child("a.b"), child);
    }

    #[test]
    fn test_effective_level_inherits() {
        let root = Logger::new("lib");
        root.set_level(LogLevel::Warning);
        let child = root.get_child("sub");
        assert_eq!(child.level(), LogLevel::NotSet);
        assert_eq!(child.effective_level(), LogLevel::Warning);

        child.set_level(LogLevel::Debug);
        assert_eq!(child.effective_level(), LogLevel::Debug);
    }

    #[test]
    fn test_unset_tree_passes_everything() {
        let root = Logger::new("lib");
        assert!(root.is_enabled_for(LogLevel::Debug));
    }

    #[test]
    fn test_add_handler_deduplicates() {
        let root = Logger::new("lib");
        let handler = Handler::new(MemorySink::new());
        root.add_handler(handler.clone());
        root.add_handler(handler.clone());
        assert_eq!(root.handler_count(), 1);

        root.remove_handler(&handler);
        root.remove_handler(&handler);
        assert_eq!(root.handler_count(), 0);
    }

    #[test]
    fn test_clear_handlers_preserves_order() {
        let root = Logger::new("lib");
        let a = Handler::new(MemorySink::new());
        let b = Handler::new(MemorySink::new());
        root.add_handler(a.clone());
        root.add_handler(b.clone());

        assert_eq!(root.clear_handlers(), vec![a, b]);
        assert_eq!(root.handler_count(), 0);
    }

    #[test]
    fn test_propagation_reaches_parent() {
        let root = Logger::new("lib");
        let root_sink = capture(&root);
        let child = root.get_child("sub");
        let child_sink = capture(&child);

        child.warning("both");
        assert_eq!(root_sink.lines().len(), 1);
        assert_eq!(child_sink.lines().len(), 1);

        child.set_propagate(false);
        child.warning("child only");
        assert_eq!(root_sink.lines().len(), 1);
        assert_eq!(child_sink.lines().len(), 2);
    }

    #[test]
    fn test_has_handlers_stops_at_non_propagating_node() {
        let root = Logger::new("lib");
        capture(&root);
        let child = root.get_child("sub");
        assert!(child.has_handlers());

        child.set_propagate(false);
        assert!(!child.has_handlers());
    }

    #[test]
    fn test_below_threshold_is_discarded() {
        let root = Logger::new("lib");
        root.set_level(LogLevel::Info);
        let sink = capture(&root);

        root.debug("hidden");
        root.info("shown");
        assert_eq!(sink.lines().len(), 1);
        assert!(sink.contents().contains("lib[INFO] - shown"));
    }

    #[test]
    fn test_log_at_records_line() {
        let root = Logger::new("lib");
        let sink = capture(&root);
        root.log_at(LogLevel::Error, "located", &Location::new("src/x.rs", 12, "lib::x"));
        assert!(sink.contents().contains("lib:12[ERROR] - located"));
    }
}
