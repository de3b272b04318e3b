//! Mock implementation of AccountRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use pa_shared::validation::display_names_match;

use crate::domain::entities::account::{Account, AccountKind, Role};
use crate::errors::{AuthError, DomainError};

use super::AccountRepository;

/// Mock account repository for testing
///
/// Both stores sit behind one lock so the uniqueness check and the insert
/// are atomic.
pub struct MockAccountRepository {
    accounts: Arc<RwLock<HashMap<Uuid, Account>>>,
}

impl MockAccountRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            accounts: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Number of stored accounts across both stores
    pub async fn len(&self) -> usize {
        self.accounts.read().await.len()
    }
}

impl Default for MockAccountRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AccountRepository for MockAccountRepository {
    async fn find_by_email(&self, kind: AccountKind, email: &str) -> Result<Option<Account>, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts
            .values()
            .find(|a| a.kind() == kind && a.email == email)
            .cloned())
    }

    async fn find_by_id(&self, kind: AccountKind, id: Uuid) -> Result<Option<Account>, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.get(&id).filter(|a| a.kind() == kind).cloned())
    }

    async fn create(&self, account: Account) -> Result<Account, DomainError> {
        let mut accounts = self.accounts.write().await;

        if accounts.values().any(|a| a.email == account.email) {
            return Err(AuthError::DuplicateEmail.into());
        }
        if account.kind() == AccountKind::Customer
            && accounts.values().any(|a| {
                a.kind() == AccountKind::Customer
                    && display_names_match(&a.display_name, &account.display_name)
            })
        {
            return Err(AuthError::DuplicateDisplayName.into());
        }

        accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn list(&self, kind: AccountKind) -> Result<Vec<Account>, DomainError> {
        let accounts = self.accounts.read().await;
        let mut list: Vec<Account> = accounts.values().filter(|a| a.kind() == kind).cloned().collect();
        list.sort_by_key(|a| a.created_at);
        Ok(list)
    }

    async fn delete(&self, kind: AccountKind, id: Uuid) -> Result<bool, DomainError> {
        let mut accounts = self.accounts.write().await;
        match accounts.get(&id) {
            Some(account) if account.kind() == kind => {
                accounts.remove(&id);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn display_name_exists(&self, kind: AccountKind, display_name: &str) -> Result<bool, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts
            .values()
            .any(|a| a.kind() == kind && display_names_match(&a.display_name, display_name)))
    }

    async fn count_by_role(&self, role: Role) -> Result<u64, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.values().filter(|a| a.role == role).count() as u64)
    }
}
