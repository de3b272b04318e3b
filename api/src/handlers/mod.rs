pub mod error;

pub use error::{validate_request, ApiError};
