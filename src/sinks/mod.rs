//! Sink implementations

pub mod file;
pub mod memory;
pub mod null;
pub mod stream;

pub use file::FileSink;
pub use memory::MemorySink;
pub use null::NullSink;
pub use stream::{StreamSink, StreamTarget};

pub use crate::core::Sink;
