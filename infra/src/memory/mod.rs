//! In-process repositories
//!
//! Used when no `DATABASE_URL` is configured (development only) and by the
//! API integration tests. State is lost on restart.

mod accounts;
mod payments;
mod revocations;

pub use accounts::InMemoryAccountRepository;
pub use payments::InMemoryPaymentRepository;
pub use revocations::InMemoryRevocationRepository;
