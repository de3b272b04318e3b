//! Revocation ledger for logged-out tokens

use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::debug;

use crate::domain::entities::token::{hash_token, RevocationEntry};
use crate::errors::DomainError;
use crate::repositories::RevocationRepository;

/// Tracks tokens that must no longer be honored until they expire
pub struct RevocationLedger<R: RevocationRepository> {
    repository: Arc<R>,
}

impl<R: RevocationRepository> RevocationLedger<R> {
    /// Create a ledger over a revocation store
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Revoke a token until `expires_at`. Revoking the same token again is a no-op.
    ///
    /// # Arguments
    ///
    /// * `token` - The exact token string presented by the client
    /// * `expires_at` - The token's own expiry
    pub async fn revoke(&self, token: &str, expires_at: DateTime<Utc>) -> Result<(), DomainError> {
        let entry = RevocationEntry::for_token(token, expires_at);
        debug!(expires_at = %entry.expires_at, "Revoking token");
        self.repository.insert(entry).await
    }

    /// Whether a token is currently revoked.
    ///
    /// Entries past their expiry count as absent even before the sweeper
    /// removes them.
    pub async fn is_revoked(&self, token: &str) -> Result<bool, DomainError> {
        let now = Utc::now();
        Ok(self
            .repository
            .find(&hash_token(token))
            .await?
            .map(|entry| entry.is_active(now))
            .unwrap_or(false))
    }

    /// Physically remove expired entries
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - Number of entries removed
    pub async fn sweep(&self) -> Result<usize, DomainError> {
        self.repository.delete_expired(Utc::now()).await
    }
}
