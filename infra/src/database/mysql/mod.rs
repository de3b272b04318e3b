//! MySQL repository implementations

pub mod account_repository_impl;
pub mod payment_repository_impl;
pub mod revocation_repository_impl;

pub use account_repository_impl::MySqlAccountRepository;
pub use payment_repository_impl::MySqlPaymentRepository;
pub use revocation_repository_impl::MySqlRevocationRepository;

use sqlx::mysql::MySqlRow;
use sqlx::{MySql, Row};
use uuid::Uuid;

use pa_core::errors::DomainError;

/// Read one column, mapping decode failures to `DomainError::Internal`
pub(crate) fn column<'r, T>(row: &'r MySqlRow, name: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, MySql> + sqlx::Type<MySql>,
{
    row.try_get(name)
        .map_err(|e| DomainError::internal(format!("Failed to get {}: {}", name, e)))
}

/// Read a `CHAR(36)` UUID column
pub(crate) fn uuid_column(row: &MySqlRow, name: &str) -> Result<Uuid, DomainError> {
    let raw: String = column(row, name)?;
    Uuid::parse_str(&raw)
        .map_err(|e| DomainError::internal(format!("Invalid UUID in {}: {}", name, e)))
}

/// Wrap a query failure with what was being attempted
pub(crate) fn query_error(action: &str, err: sqlx::Error) -> DomainError {
    DomainError::internal(format!("Failed to {}: {}", action, err))
}

/// Whether a write hit a unique key (MySQL error 1062)
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.is_unique_violation(),
        _ => false,
    }
}

/// Whether a write hit the named unique key
///
/// MySQL reports no constraint name separately, so the key is matched in
/// the message (`Duplicate entry '..' for key 'customers.uk_..'`).
pub(crate) fn is_unique_violation_on(err: &sqlx::Error, key: &str) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.is_unique_violation() && db_err.message().contains(key),
        _ => false,
    }
}
