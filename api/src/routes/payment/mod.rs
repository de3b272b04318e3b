//! Customer payment routes (role `user`)

use actix_web::{web, HttpResponse};

use pa_core::repositories::{AccountRepository, PaymentRepository, RevocationRepository};

use crate::dto::payment::{PaymentView, SubmitPaymentRequest};
use crate::handlers::{validate_request, ApiError};
use crate::middleware::AuthContext;
use crate::routes::AppState;

/// Handler for POST /api/payments
///
/// The owner is always the authenticated caller.
///
/// # Request Body
///
/// ```json
/// { "customerName": "Jane Doe", "amount": 12.5, "paymentMethod": "card" }
/// ```
pub async fn submit<A, R, P>(
    state: web::Data<AppState<A, R, P>>,
    auth: AuthContext,
    request: web::Json<SubmitPaymentRequest>,
) -> Result<HttpResponse, ApiError>
where
    A: AccountRepository + 'static,
    R: RevocationRepository + 'static,
    P: PaymentRepository + 'static,
{
    validate_request(&*request)?;

    let payment = state
        .payments
        .submit(&auth.identity, request.into_inner().into())
        .await?;

    Ok(HttpResponse::Created().json(PaymentView::from(payment)))
}

/// Handler for GET /api/payments
pub async fn list_own<A, R, P>(
    state: web::Data<AppState<A, R, P>>,
    auth: AuthContext,
) -> Result<HttpResponse, ApiError>
where
    A: AccountRepository + 'static,
    R: RevocationRepository + 'static,
    P: PaymentRepository + 'static,
{
    let payments = state.payments.list_own(&auth.identity).await?;
    let views: Vec<PaymentView> = payments.into_iter().map(PaymentView::from).collect();
    Ok(HttpResponse::Ok().json(views))
}
