use actix_web::{web, HttpResponse};

use pa_core::repositories::{AccountRepository, PaymentRepository, RevocationRepository};

use crate::handlers::ApiError;
use crate::middleware::AuthContext;
use crate::routes::AppState;

/// Handler for GET /api/auth/me
///
/// Returns the caller's account view; 404 if the account was deleted after
/// the token was issued.
pub async fn me<A, R, P>(
    state: web::Data<AppState<A, R, P>>,
    auth: AuthContext,
) -> Result<HttpResponse, ApiError>
where
    A: AccountRepository + 'static,
    R: RevocationRepository + 'static,
    P: PaymentRepository + 'static,
{
    let account = state.credentials.current_account(&auth.identity).await?;
    Ok(HttpResponse::Ok().json(account))
}
