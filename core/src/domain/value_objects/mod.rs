//! Value objects handed across layer boundaries.

pub mod account_view;
pub mod identity;

pub use account_view::AccountView;
pub use identity::Identity;
