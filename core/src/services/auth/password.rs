//! bcrypt password hashing

use once_cell::sync::OnceCell;
use std::sync::Arc;

use pa_shared::config::PasswordConfig;

use crate::errors::DomainError;

/// Secret hashed once per hasher to equalize login timing for unknown emails
const DUMMY_SECRET: &str = "payapprove-timing-equalizer";

/// Hashes and verifies passwords with bcrypt on the blocking thread pool
#[derive(Clone)]
pub struct PasswordHasher {
    cost: u32,
    dummy_hash: Arc<OnceCell<String>>,
}

impl PasswordHasher {
    /// Create a hasher; the cost is clamped to the configured minimum
    pub fn new(config: &PasswordConfig) -> Self {
        Self {
            cost: config.effective_cost(),
            dummy_hash: Arc::new(OnceCell::new()),
        }
    }

    /// bcrypt cost in use
    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash a password with a fresh random salt
    pub async fn hash(&self, password: &str) -> Result<String, DomainError> {
        let password = password.to_owned();
        let cost = self.cost;

        tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|e| DomainError::internal(format!("Hashing task failed: {}", e)))?
            .map_err(|e| DomainError::internal(format!("Password hashing failed: {}", e)))
    }

    /// Check a candidate password against a stored hash
    pub async fn verify(&self, candidate: &str, hash: &str) -> Result<bool, DomainError> {
        let candidate = candidate.to_owned();
        let hash = hash.to_owned();

        tokio::task::spawn_blocking(move || bcrypt::verify(candidate, &hash))
            .await
            .map_err(|e| DomainError::internal(format!("Verification task failed: {}", e)))?
            .map_err(|e| DomainError::internal(format!("Password verification failed: {}", e)))
    }

    /// Spend the same bcrypt work as a real verification and discard the result
    pub async fn verify_dummy(&self, candidate: &str) -> Result<(), DomainError> {
        let candidate = candidate.to_owned();
        let cost = self.cost;
        let cell = Arc::clone(&self.dummy_hash);

        tokio::task::spawn_blocking(move || -> Result<(), bcrypt::BcryptError> {
            let hash = cell.get_or_try_init(|| bcrypt::hash(DUMMY_SECRET, cost))?;
            bcrypt::verify(candidate, hash)?;
            Ok(())
        })
        .await
        .map_err(|e| DomainError::internal(format!("Verification task failed: {}", e)))?
        .map_err(|e| DomainError::internal(format!("Password verification failed: {}", e)))
    }
}
