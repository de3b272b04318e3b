use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use pa_core::domain::entities::payment::{Payment, PaymentMethod, PaymentStatus};
use pa_core::services::SubmitPaymentCommand;

#[derive(Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitPaymentRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Customer name is required"))]
    pub customer_name: String,
    #[validate(range(min = 0.01, message = "Amount must be greater than zero"))]
    pub amount: f64,
    #[serde(default)]
    #[validate(length(min = 1, message = "Payment method is required"))]
    pub payment_method: String,
}

impl From<SubmitPaymentRequest> for SubmitPaymentCommand {
    fn from(request: SubmitPaymentRequest) -> Self {
        SubmitPaymentCommand {
            customer_name: request.customer_name,
            amount: request.amount,
            payment_method: request.payment_method,
        }
    }
}

#[derive(Clone, Deserialize)]
pub struct UpdateStatusRequest {
    #[serde(default)]
    pub status: String,
}

/// Payment as returned to clients; `amount` is in currency units
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentView {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub customer_name: String,
    pub amount: f64,
    pub payment_method: PaymentMethod,
    pub status: PaymentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviewed_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Payment> for PaymentView {
    fn from(payment: Payment) -> Self {
        Self {
            id: payment.id,
            owner_id: payment.owner_id,
            customer_name: payment.customer_name,
            amount: payment.amount_cents as f64 / 100.0,
            payment_method: payment.method,
            status: payment.status,
            reviewed_by: payment.reviewed_by,
            created_at: payment.created_at,
            updated_at: payment.updated_at,
        }
    }
}
