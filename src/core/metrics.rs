//! Dispatch counters for observing logger behavior

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters tracking what happened to entries handed to a logger.
///
/// All counters are relaxed atomics: cheap to bump from any thread, with no
/// ordering relationship to the log lines themselves. `initializations`
/// counts lazy-default materializations and is how tests observe that N
/// concurrent first calls initialized exactly once.
///
/// # Example
///
/// ```
/// use outlog::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
/// metrics.record_logged();
/// metrics.record_filtered();
/// assert_eq!(metrics.messages_logged(), 1);
/// assert_eq!(metrics.messages_filtered(), 1);
/// ```
#[derive(Debug, Default)]
pub struct LoggerMetrics {
    messages_logged: AtomicU64,
    messages_filtered: AtomicU64,
    messages_dropped: AtomicU64,
    hook_failures: AtomicU64,
    write_failures: AtomicU64,
    initializations: AtomicU64,
}

impl LoggerMetrics {
    pub const fn new() -> Self {
        Self {
            messages_logged: AtomicU64::new(0),
            messages_filtered: AtomicU64::new(0),
            messages_dropped: AtomicU64::new(0),
            hook_failures: AtomicU64::new(0),
            write_failures: AtomicU64::new(0),
            initializations: AtomicU64::new(0),
        }
    }

    /// Record a line fully written to the sink. Returns the previous count.
    #[inline]
    pub fn record_logged(&self) -> u64 {
        self.messages_logged.fetch_add(1, Ordering::Relaxed)
    }

    /// Record an entry rejected by the minimum-level filter.
    #[inline]
    pub fn record_filtered(&self) -> u64 {
        self.messages_filtered.fetch_add(1, Ordering::Relaxed)
    }

    /// Record an entry dropped because the logger was closed.
    #[inline]
    pub fn record_dropped(&self) -> u64 {
        self.messages_dropped.fetch_add(1, Ordering::Relaxed)
    }

    /// Record a hook that returned an error or panicked.
    #[inline]
    pub fn record_hook_failure(&self) -> u64 {
        self.hook_failures.fetch_add(1, Ordering::Relaxed)
    }

    /// Record a formatter or sink failure that lost a line.
    #[inline]
    pub fn record_write_failure(&self) -> u64 {
        self.write_failures.fetch_add(1, Ordering::Relaxed)
    }

    /// Record a lazy-default materialization.
    #[inline]
    pub fn record_initialization(&self) -> u64 {
        self.initializations.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn messages_logged(&self) -> u64 {
        self.messages_logged.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn messages_filtered(&self) -> u64 {
        self.messages_filtered.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn messages_dropped(&self) -> u64 {
        self.messages_dropped.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn hook_failures(&self) -> u64 {
        self.hook_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn write_failures(&self) -> u64 {
        self.write_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn initializations(&self) -> u64 {
        self.initializations.load(Ordering::Relaxed)
    }

    /// Percentage of entries lost after passing the level filter (dropped on
    /// a closed logger or lost to write failures).
    pub fn drop_rate(&self) -> f64 {
        let logged = self.messages_logged();
        let lost = self.messages_dropped() + self.write_failures();
        let total = logged + lost;
        if total == 0 {
            0.0
        } else {
            (lost as f64 / total as f64) * 100.0
        }
    }

    /// Reset all counters to zero.
    pub fn reset(&self) {
        self.messages_logged.store(0, Ordering::Relaxed);
        self.messages_filtered.store(0, Ordering::Relaxed);
        self.messages_dropped.store(0, Ordering::Relaxed);
        self.hook_failures.store(0, Ordering::Relaxed);
        self.write_failures.store(0, Ordering::Relaxed);
        self.initializations.store(0, Ordering::Relaxed);
    }
}

impl Clone for LoggerMetrics {
    /// Snapshot the counters at a point in time.
    fn clone(&self) -> Self {
        Self {
            messages_logged: AtomicU64::new(self.messages_logged()),
            messages_filtered: AtomicU64::new(self.messages_filtered()),
            messages_dropped: AtomicU64::new(self.messages_dropped()),
            hook_failures: AtomicU64::new(self.hook_failures()),
            write_failures: AtomicU64::new(self.write_failures()),
            initializations: AtomicU64::new(self.initializations()),
        }
    }
}
