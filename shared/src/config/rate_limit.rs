//! Request rate limiting configuration

use serde::{Deserialize, Serialize};

/// Fixed-window request budget per client IP
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RateLimitConfig {
    /// Requests allowed per client within one window
    #[serde(default = "default_max_requests")]
    pub max_requests: u32,

    /// Window length in seconds
    #[serde(default = "default_window_seconds")]
    pub window_seconds: u64,

    /// Apply the limiter at all
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Key clients by the first `X-Forwarded-For` entry (behind a proxy)
    #[serde(default)]
    pub trust_forwarded_for: bool,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: default_max_requests(),
            window_seconds: default_window_seconds(),
            enabled: default_enabled(),
            trust_forwarded_for: false,
        }
    }
}

impl RateLimitConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let max_requests = std::env::var("RATE_LIMIT_MAX_REQUESTS")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|max: &u32| *max > 0)
            .unwrap_or(defaults.max_requests);
        let window_seconds = std::env::var("RATE_LIMIT_WINDOW_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|secs: &u64| *secs > 0)
            .unwrap_or(defaults.window_seconds);
        let trust_forwarded_for = std::env::var("RATE_LIMIT_TRUST_PROXY")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);

        Self {
            max_requests,
            window_seconds,
            trust_forwarded_for,
            ..defaults
        }
    }

    /// Budget of `max_requests` per `window_seconds`
    pub fn new(max_requests: u32, window_seconds: u64) -> Self {
        Self {
            max_requests,
            window_seconds,
            ..Default::default()
        }
    }
}

fn default_max_requests() -> u32 {
    100
}

fn default_window_seconds() -> u64 {
    15 * 60
}

fn default_enabled() -> bool {
    true
}
