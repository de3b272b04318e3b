//! Domain-specific error types for authentication and related operations
//!
//! The `Display` text of each variant is the message returned to clients,
//! so it must never carry secrets, hashes or token material.

use thiserror::Error;

/// Authentication and authorization errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Unknown email or wrong password; the two cases are indistinguishable
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User already exists")]
    DuplicateEmail,

    /// Another customer already uses this display name
    #[error("Username already taken")]
    DuplicateDisplayName,

    /// Authenticated identity lacks the role the route requires
    #[error("Access denied")]
    AccessDenied,
}

/// Token-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("No token, authorization denied")]
    Missing,

    #[error("Token has been revoked. Please log in again.")]
    Revoked,

    #[error("Token expired")]
    Expired,

    #[error("Token not yet valid")]
    NotYetValid,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Invalid token format")]
    InvalidFormat,

    #[error("Missing claim: {claim}")]
    MissingClaim { claim: String },

    #[error("Token generation failed")]
    GenerationFailed,
}

impl TokenError {
    /// Whether the token was rejected for its content rather than absence or revocation
    pub fn is_invalid_token(&self) -> bool {
        !matches!(self, TokenError::Missing | TokenError::Revoked)
    }
}

/// Input validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required field: {field}")]
    RequiredField { field: String },

    #[error("Invalid display name")]
    InvalidDisplayName,

    #[error("Invalid email")]
    InvalidEmail,

    #[error("Password not strong enough")]
    WeakPassword,

    #[error("Invalid role: {role}")]
    InvalidRole { role: String },

    #[error("Amount must be greater than zero")]
    InvalidAmount,

    #[error("Invalid customer name")]
    InvalidCustomerName,

    #[error("Invalid payment method")]
    InvalidPaymentMethod,

    #[error("Invalid payment status")]
    InvalidPaymentStatus,

    #[error("Business rule violation: {rule}")]
    BusinessRuleViolation { rule: String },
}
