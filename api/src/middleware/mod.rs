pub mod auth;
pub mod cors;
pub mod rate_limit;
pub mod role;
pub mod security;

pub use auth::{AuthContext, JwtAuth, SharedAuthenticator};
pub use cors::create_cors;
pub use rate_limit::RateLimiter;
pub use role::RequireRole;
pub use security::SecurityHeaders;
