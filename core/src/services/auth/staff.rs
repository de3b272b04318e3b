//! Staff account management for admins

use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::domain::entities::account::{AccountKind, Role};
use crate::domain::value_objects::{AccountView, Identity};
use crate::errors::{DomainError, DomainResult, ValidationError};
use crate::repositories::AccountRepository;

use super::account_store::{AccountStore, NewAccount};

/// Admin input for a new staff account
#[derive(Clone)]
pub struct CreateStaffCommand {
    pub display_name: String,
    pub email: String,
    pub password: String,
    /// Defaults to `employee`
    pub role: Option<Role>,
}

/// Lists, creates and deletes employee and admin accounts
pub struct StaffService<A: AccountRepository> {
    accounts: Arc<AccountStore<A>>,
}

impl<A: AccountRepository> StaffService<A> {
    pub fn new(accounts: Arc<AccountStore<A>>) -> Self {
        Self { accounts }
    }

    /// All staff accounts, without secret hashes
    pub async fn list(&self) -> DomainResult<Vec<AccountView>> {
        let accounts = self.accounts.repository().list(AccountKind::Staff).await?;
        Ok(accounts.iter().map(AccountView::from).collect())
    }

    /// Create a staff account
    ///
    /// # Returns
    ///
    /// * `Ok(AccountView)` - The created account
    /// * `Err(DomainError::ValidationErr(ValidationError::InvalidRole))` - Role `user` requested
    /// * `Err(DomainError::Auth(AuthError::DuplicateEmail))` - Email used by any account
    pub async fn create(&self, command: CreateStaffCommand) -> DomainResult<AccountView> {
        let role = command.role.unwrap_or(Role::Employee);
        if role.kind() != AccountKind::Staff {
            return Err(ValidationError::InvalidRole {
                role: role.to_string(),
            }
            .into());
        }

        let account = self
            .accounts
            .create(NewAccount {
                display_name: command.display_name,
                email: command.email,
                password: command.password,
                role,
            })
            .await?;

        Ok(AccountView::from(&account))
    }

    /// Delete a staff account
    ///
    /// # Returns
    ///
    /// * `Ok(())` - Account deleted
    /// * `Err(DomainError::ValidationErr)` - The admin tried to delete their own account
    /// * `Err(DomainError::NotFound)` - No staff account with that ID
    pub async fn delete(&self, actor: &Identity, id: Uuid) -> DomainResult<()> {
        if actor.account_id == id {
            return Err(ValidationError::BusinessRuleViolation {
                rule: "You cannot delete your own account".to_string(),
            }
            .into());
        }

        if !self.accounts.repository().delete(AccountKind::Staff, id).await? {
            return Err(DomainError::not_found("Employee"));
        }

        info!(account_id = %id, deleted_by = %actor.account_id, "Staff account deleted");
        Ok(())
    }

    /// Create the first admin unless one already exists
    ///
    /// # Returns
    ///
    /// * `Ok(Some(AccountView))` - Admin created
    /// * `Ok(None)` - An admin already exists; nothing changed
    pub async fn bootstrap_admin(
        &self,
        display_name: String,
        email: String,
        password: String,
    ) -> DomainResult<Option<AccountView>> {
        if self.accounts.repository().count_by_role(Role::Admin).await? > 0 {
            info!("Admin account already exists, skipping bootstrap");
            return Ok(None);
        }

        let view = self
            .create(CreateStaffCommand {
                display_name,
                email,
                password,
                role: Some(Role::Admin),
            })
            .await?;
        Ok(Some(view))
    }
}
