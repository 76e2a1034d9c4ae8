//! HTTP timeout configuration for provider calls

use serde::{Deserialize, Serialize};
use std::time::Duration;

fn default_connect_secs() -> u64 {
    30
}

fn default_request_secs() -> u64 {
    120
}

/// Timeout configuration for the HTTP transport.
///
/// Controls two independent limits: how long to wait for a TCP connection
/// to be established, and how long the complete request/response cycle may
/// take. Model calls routinely run for minutes on large outputs, so the
/// request timeout defaults much higher than the connection timeout.
///
/// # Examples
///
/// ```
/// use scribe_core::config::TimeoutConfig;
///
/// // Default timeouts (30s connect, 120s request)
/// let timeouts = TimeoutConfig::default();
///
/// // Relaxed timeouts for long report generation
/// let timeouts = TimeoutConfig::default()
///     .with_connect_secs(60)
///     .with_request_secs(300);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeoutConfig {
    /// Maximum time in seconds to establish a TCP connection
    #[serde(default = "default_connect_secs")]
    pub connect_secs: u64,

    /// Maximum time in seconds for the complete request/response cycle
    #[serde(default = "default_request_secs")]
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_secs: default_connect_secs(),
            request_secs: default_request_secs(),
        }
    }
}

impl TimeoutConfig {
    /// Set the connection timeout in seconds
    pub fn with_connect_secs(mut self, secs: u64) -> Self {
        self.connect_secs = secs;
        self
    }

    /// Set the request timeout in seconds
    pub fn with_request_secs(mut self, secs: u64) -> Self {
        self.request_secs = secs;
        self
    }

    /// Connection timeout as a [`Duration`]
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_secs)
    }

    /// Request timeout as a [`Duration`]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_secs)
    }
}
