pub mod auth;
pub mod payment;
pub mod staff;

pub use pa_shared::ErrorResponse;
