//! Sink trait for log output destinations

use super::error::Result;

/// Raw output target behind a [`Handler`](super::Handler).
///
/// A sink receives fully rendered lines; level filtering and formatting
/// happen in the handler that owns it.
pub trait Sink: Send + Sync {
    fn write(&mut self, rendered: &str) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;

    /// Whether output is persisted to a file. File-backed sinks never get
    /// an automatically selected color formatter.
    fn is_file_backed(&self) -> bool {
        false
    }

    /// Whether the target is an interactive terminal
    fn is_terminal(&self) -> bool {
        false
    }
}
