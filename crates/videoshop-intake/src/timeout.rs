//! Timeout configuration for order submissions.

use std::time::Duration;

/// Deadlines applied to every submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeoutConfig {
    /// Connection timeout.
    pub connect: Duration,
    /// Total operation timeout, including reading the response body.
    pub total: Duration,
}

impl TimeoutConfig {
    /// Create a new timeout configuration.
    pub fn new(connect: Duration, total: Duration) -> Self {
        Self { connect, total }
    }

    /// Create from millisecond values, as read from configuration.
    pub fn from_millis(connect_ms: u64, total_ms: u64) -> Self {
        Self::new(Duration::from_millis(connect_ms), Duration::from_millis(total_ms))
    }
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect: Duration::from_secs(5),
            total: Duration::from_secs(15),
        }
    }
}
