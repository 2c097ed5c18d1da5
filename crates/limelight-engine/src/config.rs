#![forbid(unsafe_code)]

//! Engine tuning knobs.

use web_time::Duration;

/// Configuration for a [`Tracker`](crate::Tracker) instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackerConfig {
    /// Minimum interval between two consecutive recompute passes.
    ///
    /// Signals arriving inside one window coalesce into a single pass. The
    /// default (~16 ms) bounds recompute cost to roughly display refresh
    /// rate; the visible cost is up to one window of indicator lag under
    /// heavy scroll.
    pub throttle_window: Duration,

    /// Number of consecutive faulted measurements after which a target is
    /// treated as detached and evicted.
    pub fault_eviction_threshold: u32,
}

impl TrackerConfig {
    /// Construct the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the throttle window.
    #[must_use]
    pub fn with_throttle_window(mut self, window: Duration) -> Self {
        self.throttle_window = window;
        self
    }

    /// Override the fault-eviction threshold. Clamped to at least 1 so a
    /// single transient fault can never evict.
    #[must_use]
    pub fn with_fault_eviction_threshold(mut self, threshold: u32) -> Self {
        self.fault_eviction_threshold = threshold.max(1);
        self
    }
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            throttle_window: Duration::from_millis(16),
            fault_eviction_threshold: 3,
        }
    }
}
