use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use pa_core::domain::entities::account::{Account, AccountKind, Role};
use pa_core::errors::{AuthError, DomainError};
use pa_core::repositories::AccountRepository;
use pa_shared::validation::display_names_match;

#[derive(Default)]
struct Stores {
    customers: HashMap<Uuid, Account>,
    staff: HashMap<Uuid, Account>,
}

impl Stores {
    fn of(&self, kind: AccountKind) -> &HashMap<Uuid, Account> {
        match kind {
            AccountKind::Customer => &self.customers,
            AccountKind::Staff => &self.staff,
        }
    }

    fn of_mut(&mut self, kind: AccountKind) -> &mut HashMap<Uuid, Account> {
        match kind {
            AccountKind::Customer => &mut self.customers,
            AccountKind::Staff => &mut self.staff,
        }
    }

    fn email_taken(&self, email: &str) -> bool {
        self.customers.values().chain(self.staff.values()).any(|a| a.email == email)
    }

    fn display_name_taken(&self, kind: AccountKind, display_name: &str) -> bool {
        self.of(kind)
            .values()
            .any(|a| display_names_match(&a.display_name, display_name))
    }
}

/// Customer and staff stores behind a single lock, so the cross-store
/// email check, the customer name check and the insert happen atomically
#[derive(Default)]
pub struct InMemoryAccountRepository {
    stores: RwLock<Stores>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn find_by_email(&self, kind: AccountKind, email: &str) -> Result<Option<Account>, DomainError> {
        let stores = self.stores.read().await;
        Ok(stores.of(kind).values().find(|a| a.email == email).cloned())
    }

    async fn find_by_id(&self, kind: AccountKind, id: Uuid) -> Result<Option<Account>, DomainError> {
        Ok(self.stores.read().await.of(kind).get(&id).cloned())
    }

    async fn create(&self, account: Account) -> Result<Account, DomainError> {
        let mut stores = self.stores.write().await;
        if stores.email_taken(&account.email) {
            return Err(AuthError::DuplicateEmail.into());
        }
        if account.kind() == AccountKind::Customer
            && stores.display_name_taken(AccountKind::Customer, &account.display_name)
        {
            return Err(AuthError::DuplicateDisplayName.into());
        }
        stores.of_mut(account.kind()).insert(account.id, account.clone());
        Ok(account)
    }

    async fn list(&self, kind: AccountKind) -> Result<Vec<Account>, DomainError> {
        let stores = self.stores.read().await;
        let mut accounts: Vec<Account> = stores.of(kind).values().cloned().collect();
        accounts.sort_by_key(|a| a.created_at);
        Ok(accounts)
    }

    async fn delete(&self, kind: AccountKind, id: Uuid) -> Result<bool, DomainError> {
        Ok(self.stores.write().await.of_mut(kind).remove(&id).is_some())
    }

    async fn count_by_role(&self, role: Role) -> Result<u64, DomainError> {
        let stores = self.stores.read().await;
        Ok(stores.of(role.kind()).values().filter(|a| a.role == role).count() as u64)
    }

    async fn display_name_exists(&self, kind: AccountKind, display_name: &str) -> Result<bool, DomainError> {
        Ok(self.stores.read().await.display_name_taken(kind, display_name))
    }

    async fn email_exists(&self, email: &str) -> Result<bool, DomainError> {
        Ok(self.stores.read().await.email_taken(email))
    }
}
