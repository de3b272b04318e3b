//! Token entities for JWT-based authentication.

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use super::account::Role;
use crate::errors::TokenError;

/// Access token lifetime (1 hour)
pub const DEFAULT_TOKEN_LIFETIME_SECONDS: i64 = 3600;

/// JWT issuer
pub const JWT_ISSUER: &str = "payapprove";

/// Claims structure for JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (account ID)
    pub sub: String,

    /// Role at issuance
    pub role: Role,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Not before timestamp
    pub nbf: i64,

    /// Issuer
    pub iss: String,

    /// JWT ID, so two tokens minted in the same second differ
    pub jti: String,
}

impl Claims {
    /// Creates new claims for an access token
    ///
    /// # Arguments
    ///
    /// * `account_id` - The account's UUID
    /// * `role` - The account's role
    /// * `lifetime_seconds` - Seconds until expiry
    /// * `issuer` - Value for the `iss` claim
    pub fn new(account_id: Uuid, role: Role, lifetime_seconds: i64, issuer: &str) -> Self {
        let now = Utc::now();
        let expiry = now + Duration::seconds(lifetime_seconds);

        Self {
            sub: account_id.to_string(),
            role,
            iat: now.timestamp(),
            exp: expiry.timestamp(),
            nbf: now.timestamp(),
            iss: issuer.to_string(),
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// Gets the account ID from the claims
    pub fn subject(&self) -> Result<Uuid, TokenError> {
        Uuid::parse_str(&self.sub).map_err(|_| TokenError::MissingClaim {
            claim: "sub".to_string(),
        })
    }

    /// Expiration as a timestamp
    pub fn expires_at(&self) -> Result<DateTime<Utc>, TokenError> {
        Utc.timestamp_opt(self.exp, 0)
            .single()
            .ok_or(TokenError::InvalidFormat)
    }
}

/// A freshly minted access token
#[derive(Clone, PartialEq, Eq)]
pub struct IssuedToken {
    /// Encoded JWT
    pub token: String,

    /// Absolute expiry
    pub expires_at: DateTime<Utc>,

    /// Seconds until expiry at issuance
    pub expires_in: i64,
}

impl std::fmt::Debug for IssuedToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IssuedToken")
            .field("token", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .field("expires_in", &self.expires_in)
            .finish()
    }
}

/// Ledger entry for a token that must no longer be honored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevocationEntry {
    /// SHA-256 hex digest of the exact token string
    pub token_hash: String,

    /// Copied from the token's `exp`; the entry is inert afterwards
    pub expires_at: DateTime<Utc>,

    /// When the token was revoked
    pub revoked_at: DateTime<Utc>,
}

impl RevocationEntry {
    /// Creates an entry for a raw token
    pub fn for_token(token: &str, expires_at: DateTime<Utc>) -> Self {
        Self {
            token_hash: hash_token(token),
            expires_at,
            revoked_at: Utc::now(),
        }
    }

    /// An entry only counts while its token could still verify
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > now
    }
}

/// Lookup key for a token in the revocation ledger
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}
