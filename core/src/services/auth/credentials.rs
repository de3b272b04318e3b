//! Credential lifecycle: registration, login and logout

use std::sync::Arc;
use tracing::{info, warn};

use pa_shared::validation::mask_email;

use crate::domain::entities::account::{AccountKind, Role};
use crate::domain::entities::token::IssuedToken;
use crate::domain::value_objects::{AccountView, Identity};
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::{AccountRepository, RevocationRepository};
use crate::services::token::{RevocationLedger, TokenIssuer};

use super::account_store::{AccountStore, NewAccount};

/// Customer self-registration input
#[derive(Clone)]
pub struct RegisterCommand {
    pub display_name: String,
    pub email: String,
    pub password: String,
}

/// Login input for any role
#[derive(Clone)]
pub struct LoginCommand {
    pub email: String,
    pub password: String,
}

/// Account view plus the token minted for it
#[derive(Debug, Clone)]
pub struct AuthOutcome {
    pub account: AccountView,
    pub token: IssuedToken,
}

/// Service handling registration, login and logout
pub struct CredentialService<A, R>
where
    A: AccountRepository,
    R: RevocationRepository,
{
    /// Credential store
    accounts: Arc<AccountStore<A>>,
    /// Token issuer
    issuer: Arc<TokenIssuer>,
    /// Revocation ledger used on logout
    ledger: Arc<RevocationLedger<R>>,
}

impl<A, R> CredentialService<A, R>
where
    A: AccountRepository,
    R: RevocationRepository,
{
    /// Create a new credential service
    ///
    /// # Arguments
    ///
    /// * `accounts` - Credential store for both customers and staff
    /// * `issuer` - Token issuer
    /// * `ledger` - Revocation ledger
    pub fn new(
        accounts: Arc<AccountStore<A>>,
        issuer: Arc<TokenIssuer>,
        ledger: Arc<RevocationLedger<R>>,
    ) -> Self {
        Self {
            accounts,
            issuer,
            ledger,
        }
    }

    /// Register a customer and issue their first token
    ///
    /// # Returns
    ///
    /// * `Ok(AuthOutcome)` - The new account's view and token
    /// * `Err(DomainError::ValidationErr)` - Input rejected; nothing is stored
    /// * `Err(DomainError::Auth(AuthError::DuplicateEmail))` - Email already used
    pub async fn register(&self, command: RegisterCommand) -> DomainResult<AuthOutcome> {
        let account = self
            .accounts
            .create(NewAccount {
                display_name: command.display_name,
                email: command.email,
                password: command.password,
                role: Role::User,
            })
            .await?;

        let token = self.issuer.issue(account.id, account.role)?;

        Ok(AuthOutcome {
            account: AccountView::from(&account),
            token,
        })
    }

    /// Log in with email and password
    ///
    /// The customer store is searched first, then the staff store. Unknown
    /// emails and wrong passwords both yield `AuthError::InvalidCredentials`.
    pub async fn login(&self, command: LoginCommand) -> DomainResult<AuthOutcome> {
        let mut found = None;
        for kind in [AccountKind::Customer, AccountKind::Staff] {
            if let Some(account) = self.accounts.find_by_email(kind, &command.email).await? {
                found = Some(account);
                break;
            }
        }

        let Some(account) = found else {
            self.accounts.verify_unknown(&command.password).await?;
            warn!(email = %mask_email(command.email.trim()), "Login failed: unknown email");
            return Err(AuthError::InvalidCredentials.into());
        };

        if !self.accounts.verify_secret(&account, &command.password).await? {
            warn!(account_id = %account.id, "Login failed: wrong password");
            return Err(AuthError::InvalidCredentials.into());
        }

        let token = self.issuer.issue(account.id, account.role)?;
        info!(account_id = %account.id, role = %account.role, "Login succeeded");

        Ok(AuthOutcome {
            account: AccountView::from(&account),
            token,
        })
    }

    /// Revoke the presented token until its own expiry
    pub async fn logout(&self, identity: &Identity) -> DomainResult<()> {
        self.ledger
            .revoke(&identity.token, identity.expires_at)
            .await?;
        info!(account_id = %identity.account_id, "Logged out");
        Ok(())
    }

    /// Current account of an authenticated caller
    ///
    /// # Returns
    ///
    /// * `Ok(AccountView)` - The caller's account
    /// * `Err(DomainError::NotFound)` - The account was deleted after the token was issued
    pub async fn current_account(&self, identity: &Identity) -> DomainResult<AccountView> {
        self.accounts
            .find_by_id(identity.role.kind(), identity.account_id)
            .await?
            .map(|account| AccountView::from(&account))
            .ok_or_else(|| DomainError::not_found("Account"))
    }
}
