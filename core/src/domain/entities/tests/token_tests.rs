use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::domain::entities::account::Role;
use crate::domain::entities::token::{hash_token, Claims, RevocationEntry, JWT_ISSUER};
use crate::errors::TokenError;

#[test]
fn test_claims_lifetime_and_subject() {
    let id = Uuid::new_v4();
    let claims = Claims::new(id, Role::Employee, 3600, JWT_ISSUER);

    assert_eq!(claims.exp - claims.iat, 3600);
    assert_eq!(claims.nbf, claims.iat);
    assert_eq!(claims.iss, "payapprove");
    assert_eq!(claims.subject().unwrap(), id);
    assert_eq!(claims.role, Role::Employee);
}

#[test]
fn test_claims_have_unique_jti() {
    let id = Uuid::new_v4();
    let a = Claims::new(id, Role::User, 3600, JWT_ISSUER);
    let b = Claims::new(id, Role::User, 3600, JWT_ISSUER);
    assert_ne!(a.jti, b.jti);
}

#[test]
fn test_unparsable_subject_is_rejected() {
    let mut claims = Claims::new(Uuid::new_v4(), Role::User, 3600, JWT_ISSUER);
    claims.sub = "not-a-uuid".to_string();
    assert!(matches!(claims.subject(), Err(TokenError::MissingClaim { .. })));
}

#[test]
fn test_hash_token_is_stable_hex() {
    let hash = hash_token("abc.def.ghi");
    assert_eq!(hash.len(), 64);
    assert_eq!(hash, hash_token("abc.def.ghi"));
    assert_ne!(hash, hash_token("abc.def.ghj"));
}

#[test]
fn test_revocation_entry_activity() {
    let now = Utc::now();
    let entry = RevocationEntry::for_token("token", now + Duration::minutes(5));
    assert!(entry.is_active(now));
    assert!(!entry.is_active(now + Duration::minutes(5)));
    assert_eq!(entry.token_hash, hash_token("token"));
}
