//! Role-based authorization

use crate::domain::entities::account::Role;
use crate::domain::value_objects::Identity;
use crate::errors::AuthError;

/// Exact role match; there is no hierarchy, so an admin is not an employee.
pub fn require_role(identity: &Identity, required: Role) -> Result<(), AuthError> {
    if identity.role == required {
        Ok(())
    } else {
        Err(AuthError::AccessDenied)
    }
}
