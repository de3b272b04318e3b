//! Unit tests for request authentication

use chrono::{Duration, Utc};
use uuid::Uuid;

use super::mocks::Fixture;
use crate::domain::entities::account::Role;
use crate::errors::{DomainError, TokenError};
use crate::services::auth::RequestAuthenticator;

fn token_error(result: Result<impl std::fmt::Debug, DomainError>) -> TokenError {
    match result {
        Err(DomainError::Token(e)) => e,
        other => panic!("expected token error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_missing_or_blank_token() {
    let fx = Fixture::new();
    assert_eq!(token_error(fx.authenticator.authenticate(None).await), TokenError::Missing);
    assert_eq!(token_error(fx.authenticator.authenticate(Some("   ")).await), TokenError::Missing);
}

#[tokio::test]
async fn test_valid_token_yields_identity() {
    let fx = Fixture::new();
    let id = Uuid::new_v4();
    let issued = fx.issuer.issue(id, Role::Employee).unwrap();

    let identity = fx.authenticator.authenticate(Some(&issued.token)).await.unwrap();

    assert_eq!(identity.account_id, id);
    assert_eq!(identity.role, Role::Employee);
    assert_eq!(identity.token, issued.token);
    assert_eq!(identity.expires_at, issued.expires_at);
}

#[tokio::test]
async fn test_revocation_takes_precedence_over_valid_signature() {
    let fx = Fixture::new();
    let issued = fx.issuer.issue(Uuid::new_v4(), Role::User).unwrap();
    fx.ledger.revoke(&issued.token, issued.expires_at).await.unwrap();

    let err = token_error(fx.authenticator.authenticate(Some(&issued.token)).await);
    assert_eq!(err, TokenError::Revoked);
}

#[tokio::test]
async fn test_stale_revocation_does_not_block_other_checks() {
    let fx = Fixture::new();
    let issued = fx.issuer.issue(Uuid::new_v4(), Role::User).unwrap();
    fx.ledger
        .revoke(&issued.token, Utc::now() - Duration::seconds(1))
        .await
        .unwrap();

    assert!(fx.authenticator.authenticate(Some(&issued.token)).await.is_ok());
}

#[tokio::test]
async fn test_malformed_token_is_invalid() {
    let fx = Fixture::new();
    let err = token_error(fx.authenticator.authenticate(Some("abc.def.ghi")).await);
    assert!(err.is_invalid_token());
}
