//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `auth` - JWT signing, token cookie and password hashing
//! - `cache` - Redis configuration for the revocation ledger
//! - `database` - MySQL connection and pool configuration
//! - `environment` - Environment detection
//! - `rate_limit` - Per-client request budget
//! - `revocation` - Revocation sweeper scheduling
//! - `server` - HTTP server and CORS configuration

pub mod auth;
pub mod cache;
pub mod database;
pub mod environment;
pub mod rate_limit;
pub mod revocation;
pub mod server;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use auth::{AuthConfig, CookieConfig, JwtConfig, PasswordConfig, MIN_BCRYPT_COST};
pub use cache::CacheConfig;
pub use database::DatabaseConfig;
pub use environment::Environment;
pub use rate_limit::RateLimitConfig;
pub use revocation::RevocationConfig;
pub use server::{CorsConfig, ServerConfig};

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration; `None` selects the in-memory stores
    #[serde(default)]
    pub database: Option<DatabaseConfig>,

    /// Redis configuration; `None` keeps revocations in the primary store
    #[serde(default)]
    pub cache: Option<CacheConfig>,

    /// Authentication configuration
    pub auth: AuthConfig,

    /// Revocation sweeper configuration
    #[serde(default)]
    pub revocation: RevocationConfig,

    /// CORS configuration
    #[serde(default)]
    pub cors: CorsConfig,

    /// Request rate limiting
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
}

impl AppConfig {
    /// Load configuration from environment
    pub fn from_env() -> Self {
        let environment = Environment::from_env();
        Self {
            environment,
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            cache: CacheConfig::from_env(),
            auth: AuthConfig::from_env(environment),
            revocation: RevocationConfig::from_env(),
            cors: CorsConfig::from_env(),
            rate_limit: RateLimitConfig::from_env(),
        }
    }

    /// Configuration for tests and local experiments: in-memory stores and
    /// the given signing secret
    pub fn for_testing(secret: impl Into<String>) -> Self {
        Self {
            auth: AuthConfig {
                jwt: JwtConfig::new(secret),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Check the settings the server refuses to start without
    pub fn validate(&self) -> Result<(), String> {
        if self.auth.jwt.signing_secret().is_none() {
            return Err("JWT_SECRET must be set to a non-empty value".to_string());
        }
        if self.auth.jwt.expiry_seconds <= 0 {
            return Err("JWT_EXPIRY_SECONDS must be positive".to_string());
        }
        if self.environment.is_production() && self.database.is_none() {
            return Err("DATABASE_URL is required in production".to_string());
        }
        Ok(())
    }
}
