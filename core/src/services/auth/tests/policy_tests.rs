//! Unit tests for role gating

use chrono::Utc;
use uuid::Uuid;

use crate::domain::entities::account::Role;
use crate::domain::value_objects::Identity;
use crate::errors::AuthError;
use crate::services::auth::require_role;

fn identity(role: Role) -> Identity {
    Identity {
        account_id: Uuid::new_v4(),
        role,
        token: "token".to_string(),
        expires_at: Utc::now(),
    }
}

#[test]
fn test_exact_role_passes() {
    assert!(require_role(&identity(Role::Admin), Role::Admin).is_ok());
    assert!(require_role(&identity(Role::Employee), Role::Employee).is_ok());
    assert!(require_role(&identity(Role::User), Role::User).is_ok());
}

#[test]
fn test_no_role_hierarchy() {
    assert_eq!(
        require_role(&identity(Role::Admin), Role::Employee),
        Err(AuthError::AccessDenied)
    );
    assert_eq!(
        require_role(&identity(Role::Employee), Role::Admin),
        Err(AuthError::AccessDenied)
    );
    assert_eq!(
        require_role(&identity(Role::User), Role::Employee),
        Err(AuthError::AccessDenied)
    );
}
