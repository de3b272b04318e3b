//! Revocation repository trait for the token blacklist.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::token::RevocationEntry;
use crate::errors::DomainError;

/// Repository trait for revoked-token persistence
///
/// Entries are keyed by the SHA-256 digest of the token string. An entry
/// whose `expires_at` has passed must not affect verification, whether or
/// not it has been physically removed yet.
#[async_trait]
pub trait RevocationRepository: Send + Sync {
    /// Insert or replace an entry
    ///
    /// # Arguments
    /// * `entry` - Entry to store; repeating the same token hash is a no-op
    ///
    /// # Returns
    /// * `Ok(())` - Entry stored
    /// * `Err(DomainError)` - Storage error occurred
    async fn insert(&self, entry: RevocationEntry) -> Result<(), DomainError>;

    /// Find an entry by token hash
    ///
    /// # Returns
    /// * `Ok(Some(RevocationEntry))` - Entry found (it may already be expired)
    /// * `Ok(None)` - Token was never revoked or the entry was removed
    /// * `Err(DomainError)` - Storage error occurred
    async fn find(&self, token_hash: &str) -> Result<Option<RevocationEntry>, DomainError>;

    /// Delete entries that expired at or before `now`
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of entries removed
    /// * `Err(DomainError)` - Deletion failed
    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<usize, DomainError>;
}
