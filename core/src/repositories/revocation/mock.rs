//! Mock implementation of RevocationRepository for testing

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::token::RevocationEntry;
use crate::errors::DomainError;

use super::RevocationRepository;

/// Mock revocation repository for testing
pub struct MockRevocationRepository {
    entries: Arc<RwLock<HashMap<String, RevocationEntry>>>,
}

impl MockRevocationRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Number of physically stored entries
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}

impl Default for MockRevocationRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RevocationRepository for MockRevocationRepository {
    async fn insert(&self, entry: RevocationEntry) -> Result<(), DomainError> {
        let mut entries = self.entries.write().await;
        entries.insert(entry.token_hash.clone(), entry);
        Ok(())
    }

    async fn find(&self, token_hash: &str) -> Result<Option<RevocationEntry>, DomainError> {
        let entries = self.entries.read().await;
        Ok(entries.get(token_hash).cloned())
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<usize, DomainError> {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| entry.is_active(now));
        Ok(before - entries.len())
    }
}
