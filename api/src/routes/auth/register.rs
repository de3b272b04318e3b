use actix_web::{web, HttpResponse};

use pa_core::repositories::{AccountRepository, PaymentRepository, RevocationRepository};
use pa_shared::validation::mask_email;

use crate::dto::auth::{AuthResponse, RegisterRequest};
use crate::handlers::ApiError;
use crate::routes::AppState;

use super::cookie::access_cookie;

/// Handler for POST /api/auth/register
///
/// Creates a customer account and logs it in.
///
/// # Request Body
///
/// ```json
/// { "displayName": "Alice", "email": "alice@example.com", "password": "Str0ng!Passw0rd" }
/// ```
///
/// # Response
///
/// ## Success (201 Created)
/// The safe account view plus `token` and `expiresIn`; the token is also
/// set as the `accessToken` cookie.
///
/// ## Errors
/// - 400 Bad Request: missing field, invalid display name or email, weak password
/// - 409 Conflict: email already registered
pub async fn register<A, R, P>(
    state: web::Data<AppState<A, R, P>>,
    request: web::Json<RegisterRequest>,
) -> Result<HttpResponse, ApiError>
where
    A: AccountRepository + 'static,
    R: RevocationRepository + 'static,
    P: PaymentRepository + 'static,
{
    let request = request.into_inner();
    log::info!("Registration attempt for {}", mask_email(request.email.trim()));

    let outcome = state.credentials.register(request.into()).await?;
    let cookie = access_cookie(&state.cookie, &outcome.token.token);

    Ok(HttpResponse::Created()
        .cookie(cookie)
        .json(AuthResponse::from(outcome)))
}
