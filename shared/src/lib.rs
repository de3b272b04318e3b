//! Shared utilities and common types for the PayApprove server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types loaded once at startup
//! - The JSON error body returned by every endpoint
//! - Input validation helpers (email shape, display name, password strength)

pub mod config;
pub mod errors;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, CacheConfig, CookieConfig, CorsConfig, DatabaseConfig,
    Environment, JwtConfig, PasswordConfig, RevocationConfig, ServerConfig,
};
pub use errors::{error_codes, ErrorResponse};
pub use utils::validation;
