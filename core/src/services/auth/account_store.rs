//! Credential store: validated, hashed account persistence

use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use pa_shared::validation::{
    is_strong_password, is_valid_display_name, is_valid_email, mask_email, normalize_email,
};

use crate::domain::entities::account::{Account, AccountKind, Role};
use crate::errors::{AuthError, DomainError, ValidationError};
use crate::repositories::AccountRepository;

use super::password::PasswordHasher;

/// Fields for a new account, plaintext password included
#[derive(Clone)]
pub struct NewAccount {
    pub display_name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

impl std::fmt::Debug for NewAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewAccount")
            .field("display_name", &self.display_name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("role", &self.role)
            .finish()
    }
}

/// Wraps an [`AccountRepository`] with input validation, email
/// normalization, uniqueness checks (email everywhere, display name among
/// customers) and password hashing.
pub struct AccountStore<A: AccountRepository> {
    repository: Arc<A>,
    hasher: PasswordHasher,
}

impl<A: AccountRepository> AccountStore<A> {
    pub fn new(repository: Arc<A>, hasher: PasswordHasher) -> Self {
        Self { repository, hasher }
    }

    /// Underlying repository
    pub fn repository(&self) -> &Arc<A> {
        &self.repository
    }

    /// Find an account by email within one store; the email is normalized first
    pub async fn find_by_email(&self, kind: AccountKind, email: &str) -> Result<Option<Account>, DomainError> {
        self.repository.find_by_email(kind, &normalize_email(email)).await
    }

    /// Find an account by ID within one store
    pub async fn find_by_id(&self, kind: AccountKind, id: Uuid) -> Result<Option<Account>, DomainError> {
        self.repository.find_by_id(kind, id).await
    }

    /// Validate, hash and persist a new account
    ///
    /// # Returns
    ///
    /// * `Ok(Account)` - The stored account
    /// * `Err(DomainError::ValidationErr)` - Display name, email or password rejected
    /// * `Err(DomainError::Auth(AuthError::DuplicateEmail))` - Email used by any account
    /// * `Err(DomainError::Auth(AuthError::DuplicateDisplayName))` - Customer name
    ///   used by another customer
    pub async fn create(&self, new: NewAccount) -> Result<Account, DomainError> {
        let (display_name, email) = Self::validate(&new)?;

        if self.repository.email_exists(&email).await? {
            return Err(AuthError::DuplicateEmail.into());
        }
        if new.role == Role::User
            && self
                .repository
                .display_name_exists(AccountKind::Customer, &display_name)
                .await?
        {
            return Err(AuthError::DuplicateDisplayName.into());
        }

        let secret_hash = self.hasher.hash(&new.password).await?;

        let account = match new.role {
            Role::User => Account::customer(display_name, email, secret_hash),
            role => Account::staff(display_name, email, secret_hash, role)?,
        };

        // The repository enforces uniqueness again for concurrent writers
        let account = self.repository.create(account).await?;
        info!(
            account_id = %account.id,
            role = %account.role,
            email = %mask_email(&account.email),
            "Account created"
        );
        Ok(account)
    }

    /// Check a candidate password against an account's hash
    pub async fn verify_secret(&self, account: &Account, candidate: &str) -> Result<bool, DomainError> {
        self.hasher.verify(candidate, &account.secret_hash).await
    }

    /// Spend a verification's worth of time for a login with no matching account
    pub async fn verify_unknown(&self, candidate: &str) -> Result<(), DomainError> {
        self.hasher.verify_dummy(candidate).await
    }

    fn validate(new: &NewAccount) -> Result<(String, String), ValidationError> {
        let display_name = new.display_name.trim();
        if display_name.is_empty() {
            return Err(ValidationError::RequiredField {
                field: "displayName".to_string(),
            });
        }
        if !is_valid_display_name(display_name) {
            return Err(ValidationError::InvalidDisplayName);
        }

        let email = normalize_email(&new.email);
        if email.is_empty() {
            return Err(ValidationError::RequiredField {
                field: "email".to_string(),
            });
        }
        if !is_valid_email(&email) {
            return Err(ValidationError::InvalidEmail);
        }

        if new.password.is_empty() {
            return Err(ValidationError::RequiredField {
                field: "password".to_string(),
            });
        }
        if !is_strong_password(&new.password) {
            return Err(ValidationError::WeakPassword);
        }

        Ok((display_name.to_string(), email))
    }
}
