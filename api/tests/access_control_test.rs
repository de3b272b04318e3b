//! Integration tests for role gates

#[macro_use]
mod common;

use actix_web::{http::StatusCode, test};
use serde_json::Value;

use common::{bearer, register_request, ADMIN_EMAIL, EMPLOYEE_EMAIL, STRONG_PASSWORD};

#[actix_web::test]
async fn test_admin_token_on_employee_route_is_forbidden() {
    let config = common::test_config();
    let components = common::components(&config);
    common::seed_staff(&components).await;
    let app = init_app!(config, components);

    let admin_token = login_token!(app, ADMIN_EMAIL);

    let resp = test::call_service(
        &app,
        bearer(test::TestRequest::get().uri("/api/employee/payments/pending"), &admin_token)
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Access denied");
}

#[actix_web::test]
async fn test_employee_token_on_admin_route_is_forbidden() {
    let config = common::test_config();
    let components = common::components(&config);
    common::seed_staff(&components).await;
    let app = init_app!(config, components);

    let employee_token = login_token!(app, EMPLOYEE_EMAIL);

    let resp = test::call_service(
        &app,
        bearer(test::TestRequest::get().uri("/api/admin/employees"), &employee_token).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn test_customer_is_confined_to_customer_routes() {
    let config = common::test_config();
    let components = common::components(&config);
    let app = init_app!(config, components);

    test::call_service(
        &app,
        register_request("alice123", "a@b.com", STRONG_PASSWORD).to_request(),
    )
    .await;
    let token = login_token!(app, "a@b.com");

    for uri in ["/api/employee/payments/pending", "/api/admin/employees"] {
        let resp = test::call_service(
            &app,
            bearer(test::TestRequest::get().uri(uri), &token).to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN, "{}", uri);
    }

    let resp = test::call_service(
        &app,
        bearer(test::TestRequest::get().uri("/api/payments"), &token).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_staff_cannot_use_customer_payment_routes() {
    let config = common::test_config();
    let components = common::components(&config);
    common::seed_staff(&components).await;
    let app = init_app!(config, components);

    for email in [EMPLOYEE_EMAIL, ADMIN_EMAIL] {
        let token = login_token!(app, email);
        let resp = test::call_service(
            &app,
            bearer(test::TestRequest::get().uri("/api/payments"), &token).to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN, "{}", email);
    }
}

#[actix_web::test]
async fn test_gated_routes_require_a_token() {
    let config = common::test_config();
    let components = common::components(&config);
    let app = init_app!(config, components);

    for uri in [
        "/api/payments",
        "/api/employee/payments/pending",
        "/api/employee/payments/history",
        "/api/admin/employees",
    ] {
        let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "{}", uri);
    }
}
