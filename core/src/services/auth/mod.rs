//! Authentication service module
//!
//! This module provides the credential and access-control layer:
//! - Password hashing on the blocking thread pool
//! - The credential store (validation, uniqueness, hashing)
//! - Request authentication against the revocation ledger
//! - Role-based authorization
//! - Registration, login and logout
//! - Staff management for admins

mod account_store;
mod authenticator;
mod credentials;
mod password;
mod policy;
mod staff;

#[cfg(test)]
mod tests;

pub use account_store::{AccountStore, NewAccount};
pub use authenticator::{Authenticator, RequestAuthenticator};
pub use credentials::{AuthOutcome, CredentialService, LoginCommand, RegisterCommand};
pub use password::PasswordHasher;
pub use policy::require_role;
pub use staff::{CreateStaffCommand, StaffService};
