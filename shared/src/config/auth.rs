//! Authentication and authorization configuration

use serde::{Deserialize, Serialize};

use super::environment::Environment;

/// Lowest bcrypt cost accepted by the server
pub const MIN_BCRYPT_COST: u32 = 10;

/// JWT signing configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Symmetric signing secret. `None` means the server is not allowed to
    /// serve authenticated routes.
    #[serde(default)]
    pub secret: Option<String>,

    /// Token lifetime in seconds
    #[serde(default = "default_expiry_seconds")]
    pub expiry_seconds: i64,

    /// JWT issuer claim
    #[serde(default = "default_issuer")]
    pub issuer: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: None,
            expiry_seconds: default_expiry_seconds(),
            issuer: default_issuer(),
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: Some(secret.into()),
            ..Default::default()
        }
    }

    /// Set token lifetime in seconds
    pub fn with_expiry_seconds(mut self, seconds: i64) -> Self {
        self.expiry_seconds = seconds;
        self
    }

    /// Returns the secret if one is configured and non-blank
    pub fn signing_secret(&self) -> Option<&str> {
        self.secret
            .as_deref()
            .filter(|secret| !secret.trim().is_empty())
    }
}

/// Settings for the cookie that carries the access token
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CookieConfig {
    /// Cookie name
    #[serde(default = "default_cookie_name")]
    pub name: String,

    /// Secure flag (HTTPS only)
    #[serde(default)]
    pub secure: bool,

    /// SameSite attribute ("Lax", "Strict" or "None")
    #[serde(default = "default_same_site")]
    pub same_site: String,

    /// HttpOnly flag
    #[serde(default = "default_http_only")]
    pub http_only: bool,

    /// Max-Age in seconds
    #[serde(default = "default_expiry_seconds")]
    pub max_age_seconds: i64,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            name: default_cookie_name(),
            secure: false,
            same_site: default_same_site(),
            http_only: default_http_only(),
            max_age_seconds: default_expiry_seconds(),
        }
    }
}

impl CookieConfig {
    /// Cookie settings for an environment; only production forces `Secure`
    pub fn for_environment(env: Environment) -> Self {
        Self {
            secure: env.is_production(),
            ..Default::default()
        }
    }
}

/// Password hashing configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PasswordConfig {
    /// bcrypt cost factor
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            bcrypt_cost: default_bcrypt_cost(),
        }
    }
}

impl PasswordConfig {
    /// Cost actually used for hashing, never below [`MIN_BCRYPT_COST`]
    pub fn effective_cost(&self) -> u32 {
        self.bcrypt_cost.max(MIN_BCRYPT_COST)
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,

    /// Token cookie configuration
    #[serde(default)]
    pub cookie: CookieConfig,

    /// Password hashing configuration
    #[serde(default)]
    pub password: PasswordConfig,
}

impl AuthConfig {
    /// Create from environment variables
    pub fn from_env(env: Environment) -> Self {
        let secret = std::env::var("JWT_SECRET").ok();
        let expiry_seconds = std::env::var("JWT_EXPIRY_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_expiry_seconds);
        let bcrypt_cost = std::env::var("BCRYPT_COST")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_bcrypt_cost);

        let mut cookie = CookieConfig::for_environment(env);
        if let Ok(name) = std::env::var("AUTH_COOKIE_NAME") {
            cookie.name = name;
        }
        cookie.max_age_seconds = expiry_seconds;

        Self {
            jwt: JwtConfig {
                secret,
                expiry_seconds,
                issuer: default_issuer(),
            },
            cookie,
            password: PasswordConfig { bcrypt_cost },
        }
    }
}

fn default_expiry_seconds() -> i64 {
    3600 // 1 hour
}

fn default_issuer() -> String {
    String::from("payapprove")
}

fn default_cookie_name() -> String {
    String::from("accessToken")
}

fn default_same_site() -> String {
    String::from("Lax")
}

fn default_http_only() -> bool {
    true
}

fn default_bcrypt_cost() -> u32 {
    MIN_BCRYPT_COST
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jwt_config_default_has_no_secret() {
        let config = JwtConfig::default();
        assert_eq!(config.expiry_seconds, 3600);
        assert_eq!(config.issuer, "payapprove");
        assert!(config.signing_secret().is_none());
    }

    #[test]
    fn test_blank_secret_is_treated_as_missing() {
        let config = JwtConfig::new("   ");
        assert!(config.signing_secret().is_none());

        let config = JwtConfig::new("s3cret");
        assert_eq!(config.signing_secret(), Some("s3cret"));
    }

    #[test]
    fn test_bcrypt_cost_is_clamped() {
        let config = PasswordConfig { bcrypt_cost: 4 };
        assert_eq!(config.effective_cost(), MIN_BCRYPT_COST);

        let config = PasswordConfig { bcrypt_cost: 12 };
        assert_eq!(config.effective_cost(), 12);
    }

    #[test]
    fn test_cookie_secure_only_in_production() {
        assert!(CookieConfig::for_environment(Environment::Production).secure);
        assert!(!CookieConfig::for_environment(Environment::Development).secure);

        let cookie = CookieConfig::default();
        assert_eq!(cookie.name, "accessToken");
        assert_eq!(cookie.same_site, "Lax");
        assert!(cookie.http_only);
        assert_eq!(cookie.max_age_seconds, 3600);
    }
}
