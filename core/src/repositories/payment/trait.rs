//! Payment repository trait.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::payment::{Payment, PaymentStatus};
use crate::errors::DomainError;

/// Repository trait for payment request persistence
///
/// List operations return the newest requests first.
#[async_trait]
pub trait PaymentRepository: Send + Sync {
    /// Persist a new payment request
    async fn create(&self, payment: Payment) -> Result<Payment, DomainError>;

    /// Find a payment by ID
    ///
    /// # Returns
    /// * `Ok(Some(Payment))` - Payment found
    /// * `Ok(None)` - No payment with that ID
    /// * `Err(DomainError)` - Storage error occurred
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Payment>, DomainError>;

    /// List payments submitted by one customer
    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<Payment>, DomainError>;

    /// List payments in the given status
    async fn list_by_status(&self, status: PaymentStatus) -> Result<Vec<Payment>, DomainError>;

    /// List payments an employee has approved or denied
    async fn list_decided(&self) -> Result<Vec<Payment>, DomainError>;

    /// Store the new status and reviewer of an existing payment
    ///
    /// # Returns
    /// * `Ok(Some(Payment))` - Updated payment
    /// * `Ok(None)` - No payment with that ID
    /// * `Err(DomainError)` - Storage error occurred
    async fn update_status(
        &self,
        id: Uuid,
        status: PaymentStatus,
        reviewer: Uuid,
    ) -> Result<Option<Payment>, DomainError>;
}
