//! Staff management routes (role `admin`)

use actix_web::{web, HttpResponse};
use uuid::Uuid;

use pa_core::repositories::{AccountRepository, PaymentRepository, RevocationRepository};
use pa_core::services::CreateStaffCommand;

use crate::dto::auth::MessageResponse;
use crate::dto::staff::CreateEmployeeRequest;
use crate::handlers::ApiError;
use crate::middleware::AuthContext;
use crate::routes::AppState;

/// Handler for GET /api/admin/employees
pub async fn list_employees<A, R, P>(
    state: web::Data<AppState<A, R, P>>,
) -> Result<HttpResponse, ApiError>
where
    A: AccountRepository + 'static,
    R: RevocationRepository + 'static,
    P: PaymentRepository + 'static,
{
    let staff = state.staff.list().await?;
    Ok(HttpResponse::Ok().json(staff))
}

/// Handler for POST /api/admin/employees
///
/// `role` defaults to `employee`; `admin` is also accepted. The same
/// validation and global email uniqueness apply as for registration.
pub async fn create_employee<A, R, P>(
    state: web::Data<AppState<A, R, P>>,
    auth: AuthContext,
    request: web::Json<CreateEmployeeRequest>,
) -> Result<HttpResponse, ApiError>
where
    A: AccountRepository + 'static,
    R: RevocationRepository + 'static,
    P: PaymentRepository + 'static,
{
    let command = CreateStaffCommand::try_from(request.into_inner())?;
    let account = state.staff.create(command).await?;

    log::info!("Admin {} created staff account {}", auth.account_id(), account.id);
    Ok(HttpResponse::Created().json(account))
}

/// Handler for DELETE /api/admin/employees/{id}
///
/// ## Errors
/// - 400 Bad Request: the admin targeted their own account, or a malformed ID
/// - 404 Not Found: no such staff account
pub async fn delete_employee<A, R, P>(
    state: web::Data<AppState<A, R, P>>,
    auth: AuthContext,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError>
where
    A: AccountRepository + 'static,
    R: RevocationRepository + 'static,
    P: PaymentRepository + 'static,
{
    let id = Uuid::parse_str(&path.into_inner())
        .map_err(|_| ApiError::bad_request("Invalid employee id"))?;

    state.staff.delete(&auth.identity, id).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Employee deleted")))
}
