//! Authentication route handlers
//!
//! - Customer registration
//! - Login for every role
//! - Logout (token revocation)
//! - Current identity

mod cookie;
pub mod login;
pub mod logout;
pub mod me;
pub mod register;

pub use login::login;
pub use logout::logout;
pub use me::me;
pub use register::register;
