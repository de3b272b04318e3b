//! Mock implementation of PaymentRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::payment::{Payment, PaymentStatus};
use crate::errors::DomainError;

use super::PaymentRepository;

/// Mock payment repository for testing
pub struct MockPaymentRepository {
    payments: Arc<RwLock<HashMap<Uuid, Payment>>>,
}

impl MockPaymentRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            payments: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    async fn collect<F>(&self, predicate: F) -> Vec<Payment>
    where
        F: Fn(&Payment) -> bool,
    {
        let payments = self.payments.read().await;
        let mut list: Vec<Payment> = payments.values().filter(|p| predicate(p)).cloned().collect();
        list.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        list
    }
}

impl Default for MockPaymentRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PaymentRepository for MockPaymentRepository {
    async fn create(&self, payment: Payment) -> Result<Payment, DomainError> {
        let mut payments = self.payments.write().await;
        payments.insert(payment.id, payment.clone());
        Ok(payment)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Payment>, DomainError> {
        Ok(self.payments.read().await.get(&id).cloned())
    }

    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<Payment>, DomainError> {
        Ok(self.collect(|p| p.owner_id == owner_id).await)
    }

    async fn list_by_status(&self, status: PaymentStatus) -> Result<Vec<Payment>, DomainError> {
        Ok(self.collect(|p| p.status == status).await)
    }

    async fn list_decided(&self) -> Result<Vec<Payment>, DomainError> {
        Ok(self.collect(|p| p.status.is_decided()).await)
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: PaymentStatus,
        reviewer: Uuid,
    ) -> Result<Option<Payment>, DomainError> {
        let mut payments = self.payments.write().await;
        Ok(payments.get_mut(&id).map(|payment| {
            payment.decide(status, reviewer);
            payment.clone()
        }))
    }
}
