//! Payment request entity reviewed by employees.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::errors::ValidationError;

/// How the customer intends to pay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Card,
    Bank,
    Cash,
    Paypal,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Card => "card",
            PaymentMethod::Bank => "bank",
            PaymentMethod::Cash => "cash",
            PaymentMethod::Paypal => "paypal",
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "card" => Ok(PaymentMethod::Card),
            "bank" => Ok(PaymentMethod::Bank),
            "cash" => Ok(PaymentMethod::Cash),
            "paypal" => Ok(PaymentMethod::Paypal),
            _ => Err(ValidationError::InvalidPaymentMethod),
        }
    }
}

/// Review state of a payment request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Approved,
    Denied,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Approved => "approved",
            PaymentStatus::Denied => "denied",
        }
    }

    /// Whether an employee has decided this payment
    pub fn is_decided(&self) -> bool {
        !matches!(self, PaymentStatus::Pending)
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(PaymentStatus::Pending),
            "approved" => Ok(PaymentStatus::Approved),
            "denied" => Ok(PaymentStatus::Denied),
            _ => Err(ValidationError::InvalidPaymentStatus),
        }
    }
}

/// A payment request submitted by a customer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payment {
    pub id: Uuid,

    /// Customer account that submitted the request
    pub owner_id: Uuid,

    /// Payer name as entered
    pub customer_name: String,

    /// Amount in cents, always positive
    pub amount_cents: i64,

    pub method: PaymentMethod,

    pub status: PaymentStatus,

    /// Employee who approved or denied the request
    pub reviewed_by: Option<Uuid>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Payment {
    /// Creates a pending payment owned by `owner_id`
    pub fn new(owner_id: Uuid, customer_name: String, amount_cents: i64, method: PaymentMethod) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            owner_id,
            customer_name,
            amount_cents,
            method,
            status: PaymentStatus::Pending,
            reviewed_by: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Records an employee decision
    pub fn decide(&mut self, status: PaymentStatus, reviewer: Uuid) {
        self.status = status;
        self.reviewed_by = Some(reviewer);
        self.updated_at = Utc::now();
    }
}
