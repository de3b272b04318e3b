use actix_web::{web, HttpResponse};

use pa_core::repositories::{AccountRepository, PaymentRepository, RevocationRepository};

use crate::dto::auth::MessageResponse;
use crate::handlers::ApiError;
use crate::middleware::AuthContext;
use crate::routes::AppState;

use super::cookie::cleared_cookie;

/// Handler for POST /api/auth/logout
///
/// Revokes the presented token until its own expiry and clears the
/// cookie. Later requests with the same token get 401.
pub async fn logout<A, R, P>(
    state: web::Data<AppState<A, R, P>>,
    auth: AuthContext,
) -> Result<HttpResponse, ApiError>
where
    A: AccountRepository + 'static,
    R: RevocationRepository + 'static,
    P: PaymentRepository + 'static,
{
    state.credentials.logout(&auth.identity).await?;

    Ok(HttpResponse::Ok()
        .cookie(cleared_cookie(&state.cookie))
        .json(MessageResponse::new("Logged out successfully")))
}
