//! Background sweeper for the revocation ledger
//!
//! Removes ledger entries whose tokens have expired. Correctness of
//! `is_revoked` never depends on this task; it only bounds storage.

use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use pa_shared::config::RevocationConfig;

use crate::errors::DomainError;
use crate::repositories::RevocationRepository;

use super::revocation::RevocationLedger;

/// Service for sweeping expired revocation entries
pub struct RevocationSweeper<R: RevocationRepository + 'static> {
    ledger: Arc<RevocationLedger<R>>,
    config: RevocationConfig,
}

impl<R: RevocationRepository> RevocationSweeper<R> {
    /// Create a new sweeper
    pub fn new(ledger: Arc<RevocationLedger<R>>, config: RevocationConfig) -> Self {
        Self { ledger, config }
    }

    /// Run a single sweep cycle
    ///
    /// # Returns
    /// * `Ok(SweepResult)` - Summary of the cycle
    /// * `Err(DomainError)` - If the sweep could not run
    pub async fn run_sweep(&self) -> Result<SweepResult, DomainError> {
        if !self.config.sweeper_enabled {
            return Ok(SweepResult::default());
        }

        let mut result = SweepResult::default();

        match self.ledger.sweep().await {
            Ok(count) => {
                result.entries_removed = count;
                info!("Revocation sweep removed {} expired entries", count);
            }
            Err(e) => {
                error!("Failed to sweep revocation ledger: {}", e);
                result.errors.push(format!("Revocation sweep error: {}", e));
            }
        }

        Ok(result)
    }

    /// Start the sweeper as a background task
    ///
    /// Returns `None` when the sweeper is disabled.
    pub fn start_background_task(self: Arc<Self>) -> Option<JoinHandle<()>> {
        if !self.config.sweeper_enabled {
            warn!("Revocation sweeper is disabled");
            return None;
        }

        let interval = std::time::Duration::from_secs(self.config.sweep_interval_seconds);

        Some(tokio::spawn(async move {
            info!(
                "Revocation sweeper started - will run every {} seconds",
                self.config.sweep_interval_seconds
            );

            let mut interval_timer = tokio::time::interval(interval);

            loop {
                interval_timer.tick().await;

                match self.run_sweep().await {
                    Ok(result) => {
                        if !result.is_success() {
                            warn!("Sweep completed with errors: {:?}", result.errors);
                        }
                    }
                    Err(e) => {
                        error!("Revocation sweep cycle failed: {}", e);
                    }
                }
            }
        }))
    }
}

/// Result of a sweep cycle
#[derive(Debug, Default)]
pub struct SweepResult {
    /// Number of expired entries deleted
    pub entries_removed: usize,
    /// Any errors encountered during the sweep
    pub errors: Vec<String>,
}

impl SweepResult {
    /// Check if the sweep was successful (no errors)
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}
