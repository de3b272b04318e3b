//! Unit tests for mock revocation repository implementation

use chrono::{Duration, Utc};

use crate::domain::entities::token::{hash_token, RevocationEntry};
use crate::repositories::revocation::{MockRevocationRepository, RevocationRepository};

#[tokio::test]
async fn test_insert_is_an_upsert() {
    let repo = MockRevocationRepository::new();
    let expires_at = Utc::now() + Duration::hours(1);

    repo.insert(RevocationEntry::for_token("tok", expires_at)).await.unwrap();
    repo.insert(RevocationEntry::for_token("tok", expires_at)).await.unwrap();

    assert_eq!(repo.len().await, 1);
    assert!(repo.find(&hash_token("tok")).await.unwrap().is_some());
}

#[tokio::test]
async fn test_delete_expired_keeps_active_entries() {
    let repo = MockRevocationRepository::new();
    let now = Utc::now();

    repo.insert(RevocationEntry::for_token("old", now - Duration::seconds(1))).await.unwrap();
    repo.insert(RevocationEntry::for_token("new", now + Duration::hours(1))).await.unwrap();

    let removed = repo.delete_expired(now).await.unwrap();

    assert_eq!(removed, 1);
    assert!(repo.find(&hash_token("old")).await.unwrap().is_none());
    assert!(repo.find(&hash_token("new")).await.unwrap().is_some());
}
