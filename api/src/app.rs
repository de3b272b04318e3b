//! Application factory
//!
//! Builds the actix-web `App` with its middleware stack and every route.

use actix_web::{
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    middleware::Logger,
    web, App, Error, HttpResponse,
};

use pa_core::domain::entities::account::Role;
use pa_core::repositories::{AccountRepository, PaymentRepository, RevocationRepository};
use pa_shared::config::AppConfig;
use pa_shared::{error_codes, ErrorResponse};

use crate::handlers::ApiError;
use crate::middleware::{
    create_cors, JwtAuth, RateLimiter, RequireRole, SecurityHeaders, SharedAuthenticator,
};
use crate::routes::{admin, auth, employee, payment, AppState};

/// Create and configure the application with all dependencies
pub fn create_app<A, R, P>(
    config: &AppConfig,
    state: web::Data<AppState<A, R, P>>,
    authenticator: web::Data<SharedAuthenticator>,
    rate_limiter: RateLimiter,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl actix_web::body::MessageBody>,
        Error = Error,
        InitError = (),
    >,
>
where
    A: AccountRepository + 'static,
    R: RevocationRepository + 'static,
    P: PaymentRepository + 'static,
{
    let cookie_name = state.cookie.name.clone();
    let cors = create_cors(config.environment, &config.cors);

    let json_config = web::JsonConfig::default()
        .limit(config.server.max_payload_size)
        .error_handler(|err, _req| {
            log::debug!("Rejected request body: {}", err);
            ApiError::bad_request("Invalid request body").into()
        });

    App::new()
        .app_data(state)
        .app_data(authenticator)
        .app_data(json_config)
        // Last wrapped runs first: logging, CORS, security headers, rate limit
        .wrap(rate_limiter)
        .wrap(SecurityHeaders::for_environment(config.environment))
        .wrap(cors)
        .wrap(Logger::default())
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/api")
                .service(
                    web::scope("/auth")
                        .route("/register", web::post().to(auth::register::<A, R, P>))
                        .route("/login", web::post().to(auth::login::<A, R, P>))
                        .route(
                            "/logout",
                            web::post()
                                .to(auth::logout::<A, R, P>)
                                .wrap(JwtAuth::new(&cookie_name)),
                        )
                        .route(
                            "/me",
                            web::get()
                                .to(auth::me::<A, R, P>)
                                .wrap(JwtAuth::new(&cookie_name)),
                        ),
                )
                .service(
                    web::scope("/payments")
                        .wrap(RequireRole::new(Role::User))
                        .wrap(JwtAuth::new(&cookie_name))
                        .route("", web::post().to(payment::submit::<A, R, P>))
                        .route("", web::get().to(payment::list_own::<A, R, P>)),
                )
                .service(
                    web::scope("/employee")
                        .wrap(RequireRole::new(Role::Employee))
                        .wrap(JwtAuth::new(&cookie_name))
                        .route("/payments/pending", web::get().to(employee::pending::<A, R, P>))
                        .route("/payments/history", web::get().to(employee::history::<A, R, P>))
                        .route(
                            "/payments/{id}/status",
                            web::put().to(employee::update_status::<A, R, P>),
                        ),
                )
                .service(
                    web::scope("/admin")
                        .wrap(RequireRole::new(Role::Admin))
                        .wrap(JwtAuth::new(&cookie_name))
                        .route("/employees", web::get().to(admin::list_employees::<A, R, P>))
                        .route("/employees", web::post().to(admin::create_employee::<A, R, P>))
                        .route(
                            "/employees/{id}",
                            web::delete().to(admin::delete_employee::<A, R, P>),
                        ),
                ),
        )
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "payapprove-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
