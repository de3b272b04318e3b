//! Verified caller identity attached to a request.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::account::Role;

/// Result of a successful token verification
#[derive(Clone, PartialEq, Eq)]
pub struct Identity {
    /// Subject of the token
    pub account_id: Uuid,

    /// Role snapshotted at issuance
    pub role: Role,

    /// The exact token presented, needed to revoke it on logout
    pub token: String,

    /// Token expiry
    pub expires_at: DateTime<Utc>,
}

impl std::fmt::Debug for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Identity")
            .field("account_id", &self.account_id)
            .field("role", &self.role)
            .field("token", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}
