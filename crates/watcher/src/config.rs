//! Watch loop configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Immutable options for a change watcher
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchOptions {
    /// Poll interval in milliseconds (default: 1000ms)
    pub poll_interval_ms: u64,
    /// Capacity of the event channel (default: 64)
    pub channel_capacity: usize,
}

impl WatchOptions {
    /// Create options from builder
    pub fn builder() -> WatchOptionsBuilder {
        WatchOptionsBuilder::default()
    }

    /// Get the poll interval as a duration
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

impl Default for WatchOptions {
    fn default() -> Self {
        Self {
            poll_interval_ms: 1000,
            channel_capacity: 64,
        }
    }
}

/// Builder for WatchOptions
#[derive(Debug, Default)]
pub struct WatchOptionsBuilder {
    options: WatchOptions,
}

impl WatchOptionsBuilder {
    /// Set the poll interval in milliseconds
    pub fn poll_interval_ms(mut self, ms: u64) -> Self {
        self.options.poll_interval_ms = ms;
        self
    }

    /// Set the event channel capacity
    pub fn channel_capacity(mut self, capacity: usize) -> Self {
        self.options.channel_capacity = capacity;
        self
    }

    /// Build the options
    pub fn build(self) -> WatchOptions {
        self.options
    }
}
