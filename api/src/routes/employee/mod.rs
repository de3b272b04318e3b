//! Payment review routes (role `employee`)

use actix_web::{web, HttpResponse};
use uuid::Uuid;

use pa_core::repositories::{AccountRepository, PaymentRepository, RevocationRepository};

use crate::dto::payment::{PaymentView, UpdateStatusRequest};
use crate::handlers::ApiError;
use crate::middleware::AuthContext;
use crate::routes::AppState;

fn views(payments: Vec<pa_core::domain::entities::payment::Payment>) -> Vec<PaymentView> {
    payments.into_iter().map(PaymentView::from).collect()
}

/// Handler for GET /api/employee/payments/pending
pub async fn pending<A, R, P>(state: web::Data<AppState<A, R, P>>) -> Result<HttpResponse, ApiError>
where
    A: AccountRepository + 'static,
    R: RevocationRepository + 'static,
    P: PaymentRepository + 'static,
{
    let payments = state.payments.list_pending().await?;
    Ok(HttpResponse::Ok().json(views(payments)))
}

/// Handler for GET /api/employee/payments/history
pub async fn history<A, R, P>(state: web::Data<AppState<A, R, P>>) -> Result<HttpResponse, ApiError>
where
    A: AccountRepository + 'static,
    R: RevocationRepository + 'static,
    P: PaymentRepository + 'static,
{
    let payments = state.payments.list_history().await?;
    Ok(HttpResponse::Ok().json(views(payments)))
}

/// Handler for PUT /api/employee/payments/{id}/status
///
/// # Request Body
///
/// ```json
/// { "status": "approved" }
/// ```
///
/// ## Errors
/// - 400 Bad Request: status other than `approved` or `denied`, or a malformed ID
/// - 404 Not Found: no such payment
pub async fn update_status<A, R, P>(
    state: web::Data<AppState<A, R, P>>,
    auth: AuthContext,
    path: web::Path<String>,
    request: web::Json<UpdateStatusRequest>,
) -> Result<HttpResponse, ApiError>
where
    A: AccountRepository + 'static,
    R: RevocationRepository + 'static,
    P: PaymentRepository + 'static,
{
    let id = Uuid::parse_str(&path.into_inner())
        .map_err(|_| ApiError::bad_request("Invalid payment id"))?;

    let payment = state
        .payments
        .decide(&auth.identity, id, &request.status)
        .await?;

    Ok(HttpResponse::Ok().json(PaymentView::from(payment)))
}
