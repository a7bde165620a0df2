//! Sink that discards everything

use crate::core::{Result, Sink};

#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl NullSink {
    pub fn new() -> Self {
        Self
    }
}

impl Sink for NullSink {
    fn write(&mut self, _rendered: &str) -> Result<()> {
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "null"
    }
}
