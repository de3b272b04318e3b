use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use pa_core::domain::entities::payment::{Payment, PaymentStatus};
use pa_core::errors::DomainError;
use pa_core::repositories::PaymentRepository;

/// Payment requests keyed by ID
#[derive(Default)]
pub struct InMemoryPaymentRepository {
    payments: RwLock<HashMap<Uuid, Payment>>,
}

impl InMemoryPaymentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    async fn newest_first<F>(&self, keep: F) -> Vec<Payment>
    where
        F: Fn(&Payment) -> bool,
    {
        let payments = self.payments.read().await;
        let mut list: Vec<Payment> = payments.values().filter(|p| keep(p)).cloned().collect();
        list.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        list
    }
}

#[async_trait]
impl PaymentRepository for InMemoryPaymentRepository {
    async fn create(&self, payment: Payment) -> Result<Payment, DomainError> {
        self.payments.write().await.insert(payment.id, payment.clone());
        Ok(payment)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Payment>, DomainError> {
        Ok(self.payments.read().await.get(&id).cloned())
    }

    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<Payment>, DomainError> {
        Ok(self.newest_first(|p| p.owner_id == owner_id).await)
    }

    async fn list_by_status(&self, status: PaymentStatus) -> Result<Vec<Payment>, DomainError> {
        Ok(self.newest_first(|p| p.status == status).await)
    }

    async fn list_decided(&self) -> Result<Vec<Payment>, DomainError> {
        Ok(self.newest_first(|p| p.status.is_decided()).await)
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
