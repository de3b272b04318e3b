//! Domain entities representing core business objects.

pub mod account;
pub mod payment;
pub mod token;

// Re-export commonly used types
pub use account::{Account, AccountKind, Role};
pub use payment::{Payment, PaymentMethod, PaymentStatus};
pub use token::{
    hash_token, Claims, IssuedToken, RevocationEntry, DEFAULT_TOKEN_LIFETIME_SECONDS, JWT_ISSUER,
};

#[cfg(test)]
mod tests;
