//! Token revocation configuration

use serde::{Deserialize, Serialize};

/// Settings for the revocation ledger and its sweeper
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RevocationConfig {
    /// Interval between expired-entry sweeps in seconds
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_seconds: u64,

    /// Run the background sweeper
    #[serde(default = "default_sweeper_enabled")]
    pub sweeper_enabled: bool,
}

impl Default for RevocationConfig {
    fn default() -> Self {
        Self {
            sweep_interval_seconds: default_sweep_interval(),
            sweeper_enabled: default_sweeper_enabled(),
        }
    }
}

impl RevocationConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let sweep_interval_seconds = std::env::var("REVOCATION_SWEEP_INTERVAL_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|secs: &u64| *secs > 0)
            .unwrap_or_else(default_sweep_interval);

        Self {
            sweep_interval_seconds,
            ..Default::default()
        }
    }
}

fn default_sweep_interval() -> u64 {
    3600 // 1 hour
}

fn default_sweeper_enabled() -> bool {
    true
}
