//! MySQL implementation of the PaymentRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::mysql::MySqlRow;
use sqlx::MySqlPool;
use uuid::Uuid;

use pa_core::domain::entities::payment::{Payment, PaymentMethod, PaymentStatus};
use pa_core::errors::DomainError;
use pa_core::repositories::PaymentRepository;

use super::{column, query_error, uuid_column};

const PAYMENT_COLUMNS: &str =
    "id, owner_id, customer_name, amount_cents, method, status, reviewed_by, created_at, updated_at";

/// MySQL implementation of PaymentRepository
pub struct MySqlPaymentRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlPaymentRepository {
    /// Create a new MySQL payment repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_payment(row: &MySqlRow) -> Result<Payment, DomainError> {
        let method: String = column(row, "method")?;
        let status: String = column(row, "status")?;
        let reviewed_by: Option<String> = column(row, "reviewed_by")?;

        Ok(Payment {
            id: uuid_column(row, "id")?,
            owner_id: uuid_column(row, "owner_id")?,
            customer_name: column(row, "customer_name")?,
            amount_cents: column(row, "amount_cents")?,
            method: method
                .parse::<PaymentMethod>()
                .map_err(|e| DomainError::internal(format!("Stored method rejected: {}", e)))?,
            status: status
                .parse::<PaymentStatus>()
                .map_err(|e| DomainError::internal(format!("Stored status rejected: {}", e)))?,
            reviewed_by: reviewed_by
                .map(|raw| Uuid::parse_str(&raw))
                .transpose()
                .map_err(|e| DomainError::internal(format!("Invalid reviewer UUID: {}", e)))?,
            created_at: column::<DateTime<Utc>>(row, "created_at")?,
            updated_at: column::<DateTime<Utc>>(row, "updated_at")?,
        })
    }

    async fn fetch_where(&self, clause: &str, bind: Option<String>) -> Result<Vec<Payment>, DomainError> {
        let query = format!(
            "SELECT {} FROM payments WHERE {} ORDER BY created_at DESC",
            PAYMENT_COLUMNS, clause
        );

        let mut q = sqlx::query(&query);
        if let Some(value) = bind {
            q = q.bind(value);
        }

        let rows = q
            .fetch_all(&self.pool)
            .await
            .map_err(|e| query_error("list payments", e))?;

        rows.iter().map(Self::row_to_payment).collect()
    }
}

#[async_trait]
impl PaymentRepository for MySqlPaymentRepository {
    async fn create(&self, payment: Payment) -> Result<Payment, DomainError> {
        let query = format!(
            "INSERT INTO payments ({}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
            PAYMENT_COLUMNS
        );

        sqlx::query(&query)
            .bind(payment.id.to_string())
            .bind(payment.owner_id.to_string())
            .bind(&payment.customer_name)
            .bind(payment.amount_cents)
            .bind(payment.method.as_str())
            .bind(payment.status.as_str())
            .bind(payment.reviewed_by.map(|id| id.to_string()))
            .bind(payment.created_at)
            .bind(payment.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| query_error("save payment", e))?;

        Ok(payment)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Payment>, DomainError> {
        let query = format!("SELECT {} FROM payments WHERE id = ? LIMIT 1", PAYMENT_COLUMNS);

        let row = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| query_error("find payment", e))?;

        row.as_ref().map(Self::row_to_payment).transpose()
    }

    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<Payment>, DomainError> {
        self.fetch_where("owner_id = ?", Some(owner_id.to_string())).await
    }

    async fn list_by_status(&self, status: PaymentStatus) -> Result<Vec<Payment>, DomainError> {
        self.fetch_where("status = ?", Some(status.as_str().to_string())).await
    }

    async fn list_decided(&self) -> Result<Vec<Payment>, DomainError> {
        self.fetch_where("status <> 'pending'", None).await
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: PaymentStatus,
        reviewer: Uuid,
    ) -> Result<Option<Payment>, DomainError> {
        // updated_at always changes, so a matched row always counts as affected
        let result = sqlx::query(
            "UPDATE payments SET status = ?, reviewed_by = ?, updated_at = ? WHERE id = ?",
        )
        .bind(status.as_str())
        .bind(reviewer.to_string())
        .bind(Utc::now())
        .bind(id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| query_error("update payment status", e))?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.find_by_id(id).await
    }
}
