//! Token service module for JWT management
//!
//! This module handles all token-related operations including:
//! - JWT access token issuance and decoding
//! - The revocation ledger consulted on every authenticated request
//! - Background sweeping of expired ledger entries

mod issuer;
mod revocation;
mod sweeper;


pub use issuer::TokenIssuer;
pub use revocation::RevocationLedger;
pub use sweeper::{RevocationSweeper, SweepResult};
