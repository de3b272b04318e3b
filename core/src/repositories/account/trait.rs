//! Account repository trait defining the interface for credential persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::account::{Account, AccountKind, Role};
use crate::errors::DomainError;

/// Repository trait for customer and staff account persistence
///
/// Customers and staff live in separate stores selected by [`AccountKind`],
/// but email uniqueness spans both.
///
/// # Security Considerations
/// - Only bcrypt hashes are stored, never plaintext passwords
/// - Emails are passed in already normalized (trimmed, lowercased)
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Find an account by normalized email within one store
    ///
    /// # Arguments
    /// * `kind` - Store to search
    /// * `email` - Normalized email address
    ///
    /// # Returns
    /// * `Ok(Some(Account))` - Account found
    /// * `Ok(None)` - No account with that email in this store
    /// * `Err(DomainError)` - Storage error occurred
    async fn find_by_email(&self, kind: AccountKind, email: &str) -> Result<Option<Account>, DomainError>;

    /// Find an account by ID within one store
    ///
    /// # Arguments
    /// * `kind` - Store to search
    /// * `id` - Account UUID
    ///
    /// # Returns
    /// * `Ok(Some(Account))` - Account found
    /// * `Ok(None)` - No account with that ID in this store
    /// * `Err(DomainError)` - Storage error occurred
    async fn find_by_id(&self, kind: AccountKind, id: Uuid) -> Result<Option<Account>, DomainError>;

    /// Persist a new account in the store matching its role
    ///
    /// # Arguments
    /// * `account` - Fully built account with hashed secret
    ///
    /// # Returns
    /// * `Ok(Account)` - The stored account
    /// * `Err(DomainError::Auth(AuthError::DuplicateEmail))` - Email already
    ///   used by a customer or staff account
    /// * `Err(DomainError::Auth(AuthError::DuplicateDisplayName))` - Customer
    ///   display name already used by another customer
    /// * `Err(DomainError)` - Storage error occurred
    async fn create(&self, account: Account) -> Result<Account, DomainError>;

    /// List all accounts in one store, oldest first
    async fn list(&self, kind: AccountKind) -> Result<Vec<Account>, DomainError>;

    /// Delete an account from one store
    ///
    /// # Returns
    /// * `Ok(true)` - Account was deleted
    /// * `Ok(false)` - No account with that ID in this store
    /// * `Err(DomainError)` - Storage error occurred
    async fn delete(&self, kind: AccountKind, id: Uuid) -> Result<bool, DomainError>;

    /// Count accounts holding a role
    async fn count_by_role(&self, role: Role) -> Result<u64, DomainError>;

    /// Check whether a display name is used within one store
    ///
    /// Names are compared trimmed and case-insensitively.
    async fn display_name_exists(&self, kind: AccountKind, display_name: &str) -> Result<bool, DomainError>;

    /// Check whether an email is used in either store
    async fn email_exists(&self, email: &str) -> Result<bool, DomainError> {
        if self.find_by_email(AccountKind::Customer, email).await?.is_some() {
            return Ok(true);
        }
        Ok(self.find_by_email(AccountKind::Staff, email).await?.is_some())
    }
}
