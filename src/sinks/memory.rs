//! In-memory sink
//!
//! Clones share one buffer, so a test can keep a clone and inspect what the
//! handler wrote.

use crate::core::{Result, Sink};
use parking_lot::Mutex;
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    lines: Arc<Mutex<Vec<String>>>,
    file_backed: bool,
    terminal: bool,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report the sink as file-backed
    #[must_use]
    pub fn file_backed(mut self, file_backed: bool) -> Self {
        self.file_backed = file_backed;
        self
    }

    /// Report the sink as an interactive terminal
    #[must_use]
    pub fn terminal(mut self, terminal: bool) -> Self {
        self.terminal = terminal;
        self
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    pub fn contents(&self) -> String {
        self.lines.lock().join("\n")
    }

    pub fn is_empty(&self) -> bool {
        self.lines.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lines.lock().clear();
    }
}

impl Sink for MemorySink {
    fn write(&mut self, rendered: &str) -> Result<()> {
        self.lines.lock().push(rendered.to_string());
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }

    fn is_file_backed(&self) -> bool {
        self.file_backed
    }

    fn is_terminal(&self) -> bool {
        self.terminal
    }
}
