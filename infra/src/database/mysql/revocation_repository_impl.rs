//! MySQL implementation of the RevocationRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::mysql::MySqlRow;
use sqlx::MySqlPool;

use pa_core::domain::entities::token::RevocationEntry;
use pa_core::errors::DomainError;
use pa_core::repositories::RevocationRepository;

use super::{column, query_error};

/// MySQL implementation of RevocationRepository
///
/// Rows live in `revoked_tokens`, keyed by the token's SHA-256 digest.
pub struct MySqlRevocationRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlRevocationRepository {
    /// Create a new MySQL revocation repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_entry(row: &MySqlRow) -> Result<RevocationEntry, DomainError> {
        Ok(RevocationEntry {
            token_hash: column(row, "token_hash")?,
            expires_at: column::<DateTime<Utc>>(row, "expires_at")?,
            revoked_at: column::<DateTime<Utc>>(row, "revoked_at")?,
        })
    }
}

#[async_trait]
impl RevocationRepository for MySqlRevocationRepository {
    async fn insert(&self, entry: RevocationEntry) -> Result<(), DomainError> {
        let query = r#"
            INSERT INTO revoked_tokens (token_hash, expires_at, revoked_at)
            VALUES (?, ?, ?)
            ON DUPLICATE KEY UPDATE expires_at = VALUES(expires_at)
        "#;

        sqlx::query(query)
            .bind(&entry.token_hash)
            .bind(entry.expires_at)
            .bind(entry.revoked_at)
            .execute(&self.pool)
            .await
            .map_err(|e| query_error("revoke token", e))?;

        Ok(())
    }

    async fn find(&self, token_hash: &str) -> Result<Option<RevocationEntry>, DomainError> {
        let query = r#"
            SELECT token_hash, expires_at, revoked_at
            FROM revoked_tokens
            WHERE token_hash = ?
            LIMIT 1
        "#;

        let row = sqlx::query(query)
            .bind(token_hash)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| query_error("find revoked token", e))?;

        row.as_ref().map(Self::row_to_entry).transpose()
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<usize, DomainError> {
        let result = sqlx::query("DELETE FROM revoked_tokens WHERE expires_at <= ?")
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(|e| query_error("delete expired revocations", e))?;

        Ok(result.rows_affected() as usize)
    }
}
