//! Route handlers grouped by audience

pub mod admin;
pub mod auth;
pub mod employee;
pub mod payment;

mod state;

pub use state::AppState;
