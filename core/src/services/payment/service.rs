//! Payment request service

use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use pa_shared::validation::is_valid_customer_name;

use crate::domain::entities::payment::{Payment, PaymentMethod, PaymentStatus};
use crate::domain::value_objects::Identity;
use crate::errors::{DomainError, DomainResult, ValidationError};
use crate::repositories::PaymentRepository;

/// Customer input for a new payment request
#[derive(Debug, Clone)]
pub struct SubmitPaymentCommand {
    pub customer_name: String,
    /// Amount in currency units, e.g. `12.50`
    pub amount: f64,
    pub payment_method: String,
}

/// Submits, lists and decides payment requests.
///
/// Role checks happen at the route; the owner and reviewer always come from
/// the authenticated identity.
pub struct PaymentService<P: PaymentRepository> {
    repository: Arc<P>,
}

impl<P: PaymentRepository> PaymentService<P> {
    pub fn new(repository: Arc<P>) -> Self {
        Self { repository }
    }

    /// Submit a pending payment owned by the caller
    pub async fn submit(&self, owner: &Identity, command: SubmitPaymentCommand) -> DomainResult<Payment> {
        let customer_name = command.customer_name.trim().to_string();
        if !is_valid_customer_name(&customer_name) {
            return Err(ValidationError::InvalidCustomerName.into());
        }
        let amount_cents = to_cents(command.amount)?;
        let method: PaymentMethod = command.payment_method.trim().parse()?;

        let payment = self
            .repository
            .create(Payment::new(owner.account_id, customer_name, amount_cents, method))
            .await?;

        info!(payment_id = %payment.id, owner_id = %owner.account_id, "Payment submitted");
        Ok(payment)
    }

    /// Payments submitted by the caller, newest first
    pub async fn list_own(&self, owner: &Identity) -> DomainResult<Vec<Payment>> {
        self.repository.list_by_owner(owner.account_id).await
    }

    /// Payments awaiting review
    pub async fn list_pending(&self) -> DomainResult<Vec<Payment>> {
        self.repository.list_by_status(PaymentStatus::Pending).await
    }

    /// Payments already approved or denied
    pub async fn list_history(&self) -> DomainResult<Vec<Payment>> {
        self.repository.list_decided().await
    }

    /// Approve or deny a payment
    ///
    /// # Returns
    ///
    /// * `Ok(Payment)` - The updated payment
    /// * `Err(DomainError::ValidationErr)` - Status is not `approved` or `denied`
    /// * `Err(DomainError::NotFound)` - No payment with that ID
    pub async fn decide(&self, reviewer: &Identity, id: Uuid, status: &str) -> DomainResult<Payment> {
        let status: PaymentStatus = status.trim().parse()?;
        if !status.is_decided() {
            return Err(ValidationError::InvalidPaymentStatus.into());
        }

        let payment = self
            .repository
            .update_status(id, status, reviewer.account_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Payment"))?;

        info!(payment_id = %id, status = %status, reviewer_id = %reviewer.account_id, "Payment reviewed");
        Ok(payment)
    }
}

fn to_cents(amount: f64) -> Result<i64, ValidationError> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(ValidationError::InvalidAmount);
    }
    let cents = (amount * 100.0).round();
    if cents < 1.0 || cents >= i64::MAX as f64 {
        return Err(ValidationError::InvalidAmount);
    }
    Ok(cents as i64)
}
