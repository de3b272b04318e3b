//! Redis-backed revocation ledger
//!
//! Each revoked token becomes a key `revoked:<sha256>` holding the JSON
//! entry, with a TTL that ends when the token itself expires. Redis drops
//! the key on its own, so the periodic sweep has nothing to do here.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use pa_core::domain::entities::token::RevocationEntry;
use pa_core::errors::DomainError;
use pa_core::repositories::RevocationRepository;

use super::RedisClient;

/// Redis implementation of RevocationRepository
pub struct RedisRevocationRepository {
    client: RedisClient,
}

impl RedisRevocationRepository {
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }

    fn key(&self, token_hash: &str) -> String {
        self.client.make_key(&format!("revoked:{}", token_hash))
    }
}

/// Whole seconds left before `expires_at`, rounded up; `None` once passed
pub(crate) fn remaining_ttl(expires_at: DateTime<Utc>, now: DateTime<Utc>) -> Option<u64> {
    let millis = (expires_at - now).num_milliseconds();
    if millis <= 0 {
        return None;
    }
    Some(((millis + 999) / 1000) as u64)
}

#[async_trait]
impl RevocationRepository for RedisRevocationRepository {
    async fn insert(&self, entry: RevocationEntry) -> Result<(), DomainError> {
        let Some(ttl) = remaining_ttl(entry.expires_at, Utc::now()) else {
            debug!("Token already expired, nothing to revoke");
            return Ok(());
        };

        let value = serde_json::to_string(&entry)
            .map_err(|e| DomainError::internal(format!("Failed to encode revocation: {}", e)))?;

        self.client
            .set_with_expiry(&self.key(&entry.token_hash), &value, ttl)
            .await?;
        Ok(())
    }

    async fn find(&self, token_hash: &str) -> Result<Option<RevocationEntry>, DomainError> {
        let Some(raw) = self.client.get(&self.key(token_hash)).await? else {
            return Ok(None);
        };

        match serde_json::from_str::<RevocationEntry>(&raw) {
            Ok(entry) => Ok(Some(entry)),
            Err(e) => {
                warn!("Unreadable revocation entry: {}", e);
                Err(DomainError::internal(format!("Failed to decode revocation: {}", e)))
            }
        }
    }

    async fn delete_expired(&self, _now: DateTime<Utc>) -> Result<usize, DomainError> {
        Ok(0)
    }
}
