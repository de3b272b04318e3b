use std::sync::Arc;

use pa_core::repositories::{AccountRepository, PaymentRepository, RevocationRepository};
use pa_core::services::{CredentialService, PaymentService, StaffService};
use pa_shared::config::CookieConfig;

/// Application state that holds shared services
pub struct AppState<A, R, P>
where
    A: AccountRepository,
    R: RevocationRepository,
    P: PaymentRepository,
{
    pub credentials: Arc<CredentialService<A, R>>,
    pub staff: Arc<StaffService<A>>,
    pub payments: Arc<PaymentService<P>>,
    /// Cookie carrier policy for the access token
    pub cookie: CookieConfig,
}
