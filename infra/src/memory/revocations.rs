use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;

use pa_core::domain::entities::token::RevocationEntry;
use pa_core::errors::DomainError;
use pa_core::repositories::RevocationRepository;

/// Revocation entries keyed by token hash
#[derive(Default)]
pub struct InMemoryRevocationRepository {
    entries: RwLock<HashMap<String, RevocationEntry>>,
}

impl InMemoryRevocationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries, expired ones included
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl RevocationRepository for InMemoryRevocationRepository {
    async fn insert(&self, entry: RevocationEntry) -> Result<(), DomainError> {
        self.entries
            .write()
            .await
            .insert(entry.token_hash.clone(), entry);
        Ok(())
    }

    async fn find(&self, token_hash: &str) -> Result<Option<RevocationEntry>, DomainError> {
        Ok(self.entries.read().await.get(token_hash).cloned())
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<usize, DomainError> {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| entry.is_active(now));
        Ok(before - entries.len())
    }
}
