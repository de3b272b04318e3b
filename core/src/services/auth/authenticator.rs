//! Request-time token verification

use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

use crate::domain::value_objects::Identity;
use crate::errors::{DomainError, TokenError};
use crate::repositories::RevocationRepository;
use crate::services::token::{RevocationLedger, TokenIssuer};

/// Turns a presented bearer token into a verified identity
///
/// Held by the HTTP layer as `Arc<dyn RequestAuthenticator>`.
#[async_trait]
pub trait RequestAuthenticator: Send + Sync {
    /// Authenticate a request
    ///
    /// # Arguments
    /// * `token` - Token extracted from the request, if any
    ///
    /// # Returns
    /// * `Ok(Identity)` - Token is valid and not revoked
    /// * `Err(DomainError::Token(TokenError::Missing))` - No token presented
    /// * `Err(DomainError::Token(TokenError::Revoked))` - Token was logged out
    /// * `Err(DomainError::Token(_))` - Bad signature, expired or malformed
    async fn authenticate(&self, token: Option<&str>) -> Result<Identity, DomainError>;
}

/// Default authenticator backed by a token issuer and a revocation ledger
pub struct Authenticator<R: RevocationRepository> {
    issuer: Arc<TokenIssuer>,
    ledger: Arc<RevocationLedger<R>>,
}

impl<R: RevocationRepository> Authenticator<R> {
    pub fn new(issuer: Arc<TokenIssuer>, ledger: Arc<RevocationLedger<R>>) -> Self {
        Self { issuer, ledger }
    }
}

#[async_trait]
impl<R: RevocationRepository + 'static> RequestAuthenticator for Authenticator<R> {
    async fn authenticate(&self, token: Option<&str>) -> Result<Identity, DomainError> {
        let token = token
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(TokenError::Missing)?;

        if self.ledger.is_revoked(token).await? {
            debug!("Rejected revoked token");
            return Err(TokenError::Revoked.into());
        }

        let claims = self.issuer.decode(token)?;
        let account_id = claims.subject()?;
        let expires_at = claims.expires_at()?;

        Ok(Identity {
            account_id,
            role: claims.role,
            token: token.to_string(),
            expires_at,
        })
    }
}
