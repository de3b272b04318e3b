//! Account entity shared by customers and staff members.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::errors::ValidationError;

/// Which store an account lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    /// Self-registered customer submitting payments
    Customer,
    /// Employee or admin created by an admin
    Staff,
}

impl AccountKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountKind::Customer => "customer",
            AccountKind::Staff => "staff",
        }
    }
}

/// Role carried by an account and snapshotted into its tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Customer
    User,
    /// Staff member who reviews payments
    Employee,
    /// Staff member who manages employees
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Employee => "employee",
            Role::Admin => "admin",
        }
    }

    /// Store that accounts with this role belong to
    pub fn kind(&self) -> AccountKind {
        match self {
            Role::User => AccountKind::Customer,
            Role::Employee | Role::Admin => AccountKind::Staff,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "employee" => Ok(Role::Employee),
            "admin" => Ok(Role::Admin),
            other => Err(ValidationError::InvalidRole {
                role: other.to_string(),
            }),
        }
    }
}

/// A registered principal with a hashed secret.
///
/// Not `Serialize`; responses use
/// [`AccountView`](crate::domain::value_objects::AccountView), which has no
/// hash field.
#[derive(Clone, PartialEq, Eq)]
pub struct Account {
    /// Unique identifier, immutable
    pub id: Uuid,

    /// Trimmed display name (3-20 characters)
    pub display_name: String,

    /// Trimmed, lowercased email; unique across customers and staff
    pub email: String,

    /// bcrypt hash of the password
    pub secret_hash: String,

    /// Account role
    pub role: Role,

    /// Timestamp when the account was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the account was last updated
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Creates a customer account from already validated fields
    pub fn customer(display_name: String, email: String, secret_hash: String) -> Self {
        Self::with_role(display_name, email, secret_hash, Role::User)
    }

    /// Creates a staff account; staff cannot carry the customer role
    pub fn staff(
        display_name: String,
        email: String,
        secret_hash: String,
        role: Role,
    ) -> Result<Self, ValidationError> {
        if role.kind() != AccountKind::Staff {
            return Err(ValidationError::InvalidRole {
                role: role.to_string(),
            });
        }
        Ok(Self::with_role(display_name, email, secret_hash, role))
    }

    fn with_role(display_name: String, email: String, secret_hash: String, role: Role) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            display_name,
            email,
            secret_hash,
            role,
            created_at: now,
            updated_at: now,
        }
    }

    /// Store this account lives in
    pub fn kind(&self) -> AccountKind {
        self.role.kind()
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("id", &self.id)
            .field("display_name", &self.display_name)
            .field("email", &self.email)
            .field("secret_hash", &"<redacted>")
            .field("role", &self.role)
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}
