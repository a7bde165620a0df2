//! Handler metrics
//!
//! Counters describing what a handler did with the records it was offered.
//! Mostly useful for verifying that suppressed handlers saw nothing.

use std::sync::atomic::{AtomicU64, Ordering};

/// Per-handler delivery counters
///
/// # Example
///
/// ```
/// use rust_library_logger::HandlerMetrics;
///
/// let metrics = HandlerMetrics::new();
/// metrics.record_emitted();
/// metrics.record_filtered();
///
/// assert_eq!(metrics.emitted_count(), 1);
/// assert_eq!(metrics.filtered_count(), 1);
/// ```
#[derive(Debug)]
pub struct HandlerMetrics {
    /// Records rendered and written to the sink
    emitted: AtomicU64,

    /// Records below the handler's threshold
    filtered: AtomicU64,

    /// Records whose write failed or panicked
    failed: AtomicU64,
}

impl HandlerMetrics {
    pub const fn new() -> Self {
        Self {
            emitted: AtomicU64::new(0),
            filtered: AtomicU64::new(0),
            failed: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn emitted_count(&self) -> u64 {
        self.emitted.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn filtered_count(&self) -> u64 {
        self.filtered.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn failed_count(&self) -> u64 {
        self.failed.load(Ordering::Relaxed)
    }

    /// Total number of records offered to the handler
    pub fn offered_count(&self) -> u64 {
        self.emitted_count() + self.filtered_count() + self.failed_count()
    }

    #[inline]
    pub fn record_emitted(&self) -> u64 {
        self.emitted.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_filtered(&self) -> u64 {
        self.filtered.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_failed(&self) -> u64 {
        self.failed.fetch_add(1, Ordering::Relaxed)
    }

    pub fn reset(&self) {
        self.emitted.store(0, Ordering::Relaxed);
        self.filtered.store(0, Ordering::Relaxed);
        self.failed.store(0, Ordering::Relaxed);
    }
}

impl Default for HandlerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for HandlerMetrics {
    /// Create a snapshot of the current counter values
    fn clone(&self) -> Self {
        Self {
            emitted: AtomicU64::new(self.emitted_count()),
            filtered: AtomicU64::new(self.filtered_count()),
            failed: AtomicU64::new(self.failed_count()),
        }
    }
}
