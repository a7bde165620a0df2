//! Standard stream sink

use crate::core::{Result, Sink};
use std::io::{IsTerminal, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamTarget {
    Stdout,
    Stderr,
}

/// Writes each record as one line to stdout or stderr
#[derive(Debug, Clone, Copy)]
pub struct StreamSink {
    target: StreamTarget,
}

impl StreamSink {
    pub fn new(target: StreamTarget) -> Self {
        Self { target }
    }

    pub fn stdout() -> Self {
        Self::new(StreamTarget::Stdout)
    }

    pub fn stderr() -> Self {
        Self::new(StreamTarget::Stderr)
    }

    pub fn target(&self) -> StreamTarget {
        self.target
    }
}

impl Default for StreamSink {
    fn default() -> Self {
        Self::stderr()
    }
}

impl Sink for StreamSink {
    fn write(&mut self, rendered: &str) -> Result<()> {
        match self.target {
            StreamTarget::Stdout => writeln!(std::io::stdout().lock(), "{}", rendered)?,
            StreamTarget::Stderr => writeln!(std::io::stderr().lock(), "{}", rendered)?,
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        match self.target {
            StreamTarget::Stdout => std::io::stdout().flush()?,
            StreamTarget::Stderr => std::io::stderr().flush()?,
        }
        Ok(())
    }

    fn name(&self) -> &str {
        match self.target {
            StreamTarget::Stdout => "stdout",
            StreamTarget::Stderr => "stderr",
        }
    }

    fn is_terminal(&self) -> bool {
        match self.target {
            StreamTarget::Stdout => std::io::stdout().is_terminal(),
            StreamTarget::Stderr => std::io::stderr().is_terminal(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_stderr() {
        let sink = StreamSink::default();
        assert_eq!(sink.target(), StreamTarget::Stderr);
        assert_eq!(sink.name(), "stderr");
        assert!(!sink.is_file_backed());
    }
}
