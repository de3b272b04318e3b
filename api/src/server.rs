//! Service wiring and HTTP server startup
//!
//! Repository selection happens in `main`; everything above the repository
//! layer is assembled here so tests and binaries share one construction path.

use std::sync::Arc;

use actix_web::{web, HttpServer};
use log::info;

use pa_core::repositories::{AccountRepository, PaymentRepository, RevocationRepository};
use pa_core::services::{
    AccountStore, Authenticator, CredentialService, PasswordHasher, PaymentService,
    RevocationLedger, RevocationSweeper, StaffService, TokenIssuer,
};
use pa_infra::memory::{
    InMemoryAccountRepository, InMemoryPaymentRepository, InMemoryRevocationRepository,
};
use pa_shared::config::AppConfig;

use crate::app::create_app;
use crate::middleware::{RateLimiter, SharedAuthenticator};
use crate::routes::AppState;

/// Repository implementations backing the services
pub struct Stores<A, R, P> {
    pub accounts: Arc<A>,
    pub revocations: Arc<R>,
    pub payments: Arc<P>,
}

impl Stores<InMemoryAccountRepository, InMemoryRevocationRepository, InMemoryPaymentRepository> {
    /// Fresh in-process stores
    pub fn in_memory() -> Self {
        Self {
            accounts: Arc::new(InMemoryAccountRepository::new()),
            revocations: Arc::new(InMemoryRevocationRepository::new()),
            payments: Arc::new(InMemoryPaymentRepository::new()),
        }
    }
}

/// Everything the HTTP layer needs, built from config and stores
pub struct Components<A, R, P>
where
    A: AccountRepository,
    R: RevocationRepository + 'static,
    P: PaymentRepository,
{
    pub state: web::Data<AppState<A, R, P>>,
    pub authenticator: web::Data<SharedAuthenticator>,
    pub sweeper: Arc<RevocationSweeper<R>>,
    /// Shared by every worker so the budget is per server
    pub rate_limiter: RateLimiter,
}

/// Build services on top of the given stores
///
/// Fails when the JWT configuration is unusable.
pub fn build_components<A, R, P>(
    config: &AppConfig,
    stores: Stores<A, R, P>,
) -> anyhow::Result<Components<A, R, P>>
where
    A: AccountRepository + 'static,
    R: RevocationRepository + 'static,
    P: PaymentRepository + 'static,
{
    let issuer = Arc::new(TokenIssuer::new(&config.auth.jwt)?);
    let ledger = Arc::new(RevocationLedger::new(stores.revocations));
    let accounts = Arc::new(AccountStore::new(
        stores.accounts,
        PasswordHasher::new(&config.auth.password),
    ));

    let credentials = Arc::new(CredentialService::new(
        accounts.clone(),
        issuer.clone(),
        ledger.clone(),
    ));
    let staff = Arc::new(StaffService::new(accounts));
    let payments = Arc::new(PaymentService::new(stores.payments));

    let authenticator: SharedAuthenticator = Arc::new(Authenticator::new(issuer, ledger.clone()));
    let sweeper = Arc::new(RevocationSweeper::new(ledger, config.revocation.clone()));

    Ok(Components {
        state: web::Data::new(AppState {
            credentials,
            staff,
            payments,
            cookie: config.auth.cookie.clone(),
        }),
        authenticator: web::Data::new(authenticator),
        sweeper,
        rate_limiter: RateLimiter::new(config.rate_limit.clone()),
    })
}

/// Start the revocation sweeper and serve HTTP until shutdown
pub async fn run<A, R, P>(config: AppConfig, stores: Stores<A, R, P>) -> anyhow::Result<()>
where
    A: AccountRepository + 'static,
    R: RevocationRepository + 'static,
    P: PaymentRepository + 'static,
{
    let components = build_components(&config, stores)?;
    let sweeper_handle = components.sweeper.clone().start_background_task();

    let bind_address = format!("{}:{}", config.server.host, config.server.port);
    info!("Server will bind to: {}", bind_address);

    let state = components.state;
    let authenticator = components.authenticator;
    let rate_limiter = components.rate_limiter;
    let app_config = config.clone();

    let mut server = HttpServer::new(move || {
        create_app(
            &app_config,
            state.clone(),
            authenticator.clone(),
            rate_limiter.clone(),
        )
    })
    .bind(&bind_address)?;

    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server.run().await?;

    if let Some(handle) = sweeper_handle {
        handle.abort();
    }
    info!("Server stopped");
    Ok(())
}
