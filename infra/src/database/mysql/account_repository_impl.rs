//! MySQL implementation of the AccountRepository trait.
//!
//! Customers and staff live in the `customers` and `staff` tables. Every
//! email is also registered in `account_emails`, whose primary key makes
//! uniqueness hold across both tables even under concurrent inserts.
//! Customer display names carry their own unique key; staff names do not.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::mysql::MySqlRow;
use sqlx::MySqlPool;
use tracing::debug;
use uuid::Uuid;

use pa_core::domain::entities::account::{Account, AccountKind, Role};
use pa_core::errors::{AuthError, DomainError};
use pa_core::repositories::AccountRepository;

use super::{column, is_unique_violation, is_unique_violation_on, query_error, uuid_column};

const ACCOUNT_COLUMNS: &str = "id, display_name, email, secret_hash, role, created_at, updated_at";

/// Unique key on `customers.display_name`
pub(crate) const CUSTOMER_DISPLAY_NAME_KEY: &str = "uk_customers_display_name";

/// MySQL implementation of AccountRepository
pub struct MySqlAccountRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlAccountRepository {
    /// Create a new MySQL account repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Table holding accounts of one kind
    pub(crate) fn table(kind: AccountKind) -> &'static str {
        match kind {
            AccountKind::Customer => "customers",
            AccountKind::Staff => "staff",
        }
    }

    fn row_to_account(row: &MySqlRow) -> Result<Account, DomainError> {
        let role: String = column(row, "role")?;

        Ok(Account {
            id: uuid_column(row, "id")?,
            display_name: column(row, "display_name")?,
            email: column(row, "email")?,
            secret_hash: column(row, "secret_hash")?,
            role: role
                .parse::<Role>()
                .map_err(|e| DomainError::internal(format!("Stored role rejected: {}", e)))?,
            created_at: column::<DateTime<Utc>>(row, "created_at")?,
            updated_at: column::<DateTime<Utc>>(row, "updated_at")?,
        })
    }
}

#[async_trait]
impl AccountRepository for MySqlAccountRepository {
    async fn find_by_email(&self, kind: AccountKind, email: &str) -> Result<Option<Account>, DomainError> {
        let query = format!(
            "SELECT {} FROM {} WHERE email = ? LIMIT 1",
            ACCOUNT_COLUMNS,
            Self::table(kind)
        );

        let row = sqlx::query(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| query_error("find account by email", e))?;

        row.as_ref().map(Self::row_to_account).transpose()
    }

    async fn find_by_id(&self, kind: AccountKind, id: Uuid) -> Result<Option<Account>, DomainError> {
        let query = format!(
            "SELECT {} FROM {} WHERE id = ? LIMIT 1",
            ACCOUNT_COLUMNS,
            Self::table(kind)
        );

        let row = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| query_error("find account by id", e))?;

        row.as_ref().map(Self::row_to_account).transpose()
    }

    async fn create(&self, account: Account) -> Result<Account, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| query_error("begin transaction", e))?;

        let claimed = sqlx::query("INSERT INTO account_emails (email, account_id, kind) VALUES (?, ?, ?)")
            .bind(&account.email)
            .bind(account.id.to_string())
            .bind(account.kind().as_str())
            .execute(&mut *tx)
            .await;

        if let Err(e) = claimed {
            if is_unique_violation(&e) {
                debug!("Email already registered");
                return Err(AuthError::DuplicateEmail.into());
            }
            return Err(query_error("reserve email", e));
        }

        let query = format!(
            "INSERT INTO {} ({}) VALUES (?, ?, ?, ?, ?, ?, ?)",
            Self::table(account.kind()),
            ACCOUNT_COLUMNS
        );

        sqlx::query(&query)
            .bind(account.id.to_string())
            .bind(&account.display_name)
            .bind(&account.email)
            .bind(&account.secret_hash)
            .bind(account.role.as_str())
            .bind(account.created_at)
            .bind(account.updated_at)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                if is_unique_violation_on(&e, CUSTOMER_DISPLAY_NAME_KEY) {
                    debug!("Customer display name already taken");
                    DomainError::from(AuthError::DuplicateDisplayName)
                } else if is_unique_violation(&e) {
                    DomainError::from(AuthError::DuplicateEmail)
                } else {
                    query_error("insert account", e)
                }
            })?;

        tx.commit()
            .await
            .map_err(|e| query_error("commit account", e))?;

        Ok(account)
    }

    async fn list(&self, kind: AccountKind) -> Result<Vec<Account>, DomainError> {
        let query = format!(
            "SELECT {} FROM {} ORDER BY created_at ASC",
            ACCOUNT_COLUMNS,
            Self::table(kind)
        );

        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| query_error("list accounts", e))?;

        rows.iter().map(Self::row_to_account).collect()
    }

    async fn delete(&self, kind: AccountKind, id: Uuid) -> Result<bool, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| query_error("begin transaction", e))?;

        let query = format!("DELETE FROM {} WHERE id = ?", Self::table(kind));
        let result = sqlx::query(&query)
            .bind(id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| query_error("delete account", e))?;

        if result.rows_affected() == 0 {
            return Ok(false);
        }

        sqlx::query("DELETE FROM account_emails WHERE account_id = ?")
            .bind(id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| query_error("release email", e))?;

        tx.commit()
            .await
            .map_err(|e| query_error("commit account deletion", e))?;

        Ok(true)
    }

    async fn count_by_role(&self, role: Role) -> Result<u64, DomainError> {
        let query = format!(
            "SELECT COUNT(*) AS total FROM {} WHERE role = ?",
            Self::table(role.kind())
        );

        let row = sqlx::query(&query)
            .bind(role.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| query_error("count accounts", e))?;

        let total: i64 = column(&row, "total")?;
        Ok(total.max(0) as u64)
    }

    async fn display_name_exists(&self, kind: AccountKind, display_name: &str) -> Result<bool, DomainError> {
        // The table collation compares case-insensitively
        let query = format!(
            "SELECT EXISTS(SELECT 1 FROM {} WHERE display_name = ?) AS present",
            Self::table(kind)
        );

        let row = sqlx::query(&query)
            .bind(display_name.trim())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| query_error("check display name", e))?;

        let present: i64 = column(&row, "present")?;
        Ok(present == 1)
    }

    async fn email_exists(&self, email: &str) -> Result<bool, DomainError> {
        let row = sqlx::query("SELECT EXISTS(SELECT 1 FROM account_emails WHERE email = ?) AS present")
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| query_error("check email", e))?;

        let present: i64 = column(&row, "present")?;
        Ok(present == 1)
    }
}
