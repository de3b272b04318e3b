use actix_web::{web, HttpResponse};

use pa_core::repositories::{AccountRepository, PaymentRepository, RevocationRepository};

use crate::dto::auth::{AuthResponse, LoginRequest};
use crate::handlers::{validate_request, ApiError};
use crate::routes::AppState;

use super::cookie::access_cookie;

/// Handler for POST /api/auth/login
///
/// One endpoint for customers, employees and admins; the role comes from
/// the matched account.
///
/// ## Errors
/// - 400 Bad Request: email or password missing
/// - 401 Unauthorized: "Invalid credentials" for an unknown email or a wrong password
pub async fn login<A, R, P>(
    state: web::Data<AppState<A, R, P>>,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError>
where
    A: AccountRepository + 'static,
    R: RevocationRepository + 'static,
    P: PaymentRepository + 'static,
{
    validate_request(&*request)?;

    let outcome = state.credentials.login(request.into_inner().into()).await?;
    let cookie = access_cookie(&state.cookie, &outcome.token.token);

    Ok(HttpResponse::Ok().cookie(cookie).json(AuthResponse::from(outcome)))
}
