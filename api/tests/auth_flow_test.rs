//! Integration tests for registration, login, logout and token carriers

#[macro_use]
mod common;

use actix_web::cookie::Cookie;
use actix_web::{http::StatusCode, test};
use serde_json::Value;

use common::{bearer, login_request, register_request, STRONG_PASSWORD};

#[actix_web::test]
async fn test_register_returns_safe_view_and_cookie() {
    let config = common::test_config();
    let components = common::components(&config);
    let app = init_app!(config, components);

    let resp = test::call_service(
        &app,
        register_request("alice123", "a@b.com", STRONG_PASSWORD).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let cookie = resp
        .response()
        .cookies()
        .find(|c| c.name() == "accessToken")
        .expect("access token cookie");
    assert_eq!(cookie.http_only(), Some(true));
    assert_eq!(cookie.path(), Some("/"));

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["displayName"], "alice123");
    assert_eq!(body["email"], "a@b.com");
    assert_eq!(body["role"], "user");
    assert!(body["id"].is_string());
    assert!(body["token"].is_string());
    assert_eq!(body["expiresIn"], 3600);
    assert!(body.get("secretHash").is_none());
    assert!(body.get("password").is_none());
}

#[actix_web::test]
async fn test_register_normalizes_email_and_rejects_duplicates() {
    let config = common::test_config();
    let components = common::components(&config);
    let app = init_app!(config, components);

    let resp = test::call_service(
        &app,
        register_request("alice123", "  Alice@Example.COM ", STRONG_PASSWORD).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["email"], "alice@example.com");

    let resp = test::call_service(
        &app,
        register_request("alice456", "alice@example.com", STRONG_PASSWORD).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "User already exists");
}

#[actix_web::test]
async fn test_register_with_staff_email_conflicts() {
    let config = common::test_config();
    let components = common::components(&config);
    common::seed_staff(&components).await;
    let app = init_app!(config, components);

    let resp = test::call_service(
        &app,
        register_request("imposter", "CLERK@payapprove.test", STRONG_PASSWORD).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

#[actix_web::test]
async fn test_wrong_password_and_unknown_email_look_the_same() {
    let config = common::test_config();
    let components = common::components(&config);
    let app = init_app!(config, components);

    test::call_service(
        &app,
        register_request("alice123", "a@b.com", STRONG_PASSWORD).to_request(),
    )
    .await;

    let wrong_password =
        test::call_service(&app, login_request("a@b.com", "Wr0ng!Pass").to_request()).await;
    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    let wrong_password: Value = test::read_body_json(wrong_password).await;
    assert_eq!(wrong_password["message"], "Invalid credentials");

    let unknown = test::call_service(
        &app,
        login_request("nobody@b.com", STRONG_PASSWORD).to_request(),
    )
    .await;
    assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);
    let unknown: Value = test::read_body_json(unknown).await;

    assert_eq!(wrong_password["message"], unknown["message"]);
    assert_eq!(wrong_password["error"], unknown["error"]);
}

#[actix_web::test]
async fn test_weak_password_creates_no_account() {
    let config = common::test_config();
    let components = common::components(&config);
    let app = init_app!(config, components);

    let resp = test::call_service(
        &app,
        register_request("alice123", "a@b.com", "weak").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Password not strong enough");

    // The email is still free, so nothing was stored
    let resp = test::call_service(
        &app,
        register_request("alice123", "a@b.com", STRONG_PASSWORD).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
}

#[actix_web::test]
async fn test_register_reports_missing_field() {
    let config = common::test_config();
    let components = common::components(&config);
    let app = init_app!(config, components);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(serde_json::json!({ "email": "a@b.com", "password": STRONG_PASSWORD }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_login_works_for_every_role() {
    let config = common::test_config();
    let components = common::components(&config);
    common::seed_staff(&components).await;
    let app = init_app!(config, components);

    test::call_service(
        &app,
        register_request("alice123", "a@b.com", STRONG_PASSWORD).to_request(),
    )
    .await;

    for (email, role) in [
        ("a@b.com", "user"),
        (common::EMPLOYEE_EMAIL, "employee"),
        (common::ADMIN_EMAIL, "admin"),
    ] {
        let resp = test::call_service(&app, login_request(email, STRONG_PASSWORD).to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK, "login as {}", role);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["role"], role);
    }
}

#[actix_web::test]
async fn test_me_accepts_every_token_carrier() {
    let config = common::test_config();
    let components = common::components(&config);
    let app = init_app!(config, components);

    test::call_service(
        &app,
        register_request("alice123", "a@b.com", STRONG_PASSWORD).to_request(),
    )
    .await;
    let token = login_token!(app, "a@b.com");

    let requests = [
        test::TestRequest::get()
            .uri("/api/auth/me")
            .cookie(Cookie::new("accessToken", token.clone())),
        test::TestRequest::get()
            .uri("/api/auth/me")
            .insert_header(("x-auth-token", token.clone())),
        bearer(test::TestRequest::get().uri("/api/auth/me"), &token),
    ];

    for request in requests {
        let resp = test::call_service(&app, request.to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["email"], "a@b.com");
        assert_eq!(body["role"], "user");
    }
}

#[actix_web::test]
async fn test_missing_and_garbage_tokens_are_rejected() {
    let config = common::test_config();
    let components = common::components(&config);
    let app = init_app!(config, components);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/api/auth/me").to_request()).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "No token, authorization denied");

    let resp = test::call_service(
        &app,
        bearer(test::TestRequest::get().uri("/api/auth/me"), "not-a-jwt").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Token is not valid");
}

#[actix_web::test]
async fn test_token_signed_with_another_secret_is_rejected() {
    let config = common::test_config();
    let components = common::components(&config);
    let app = init_app!(config, components);

    let mut other_config = common::test_config();
    other_config.auth.jwt.secret = Some("a-different-secret".to_string());
    let other = common::components(&other_config);
    let other_app = init_app!(other_config, other);

    test::call_service(
        &other_app,
        register_request("alice123", "a@b.com", STRONG_PASSWORD).to_request(),
    )
    .await;
    let foreign_token = login_token!(other_app, "a@b.com");

    let resp = test::call_service(
        &app,
        bearer(test::TestRequest::get().uri("/api/auth/me"), &foreign_token).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_logout_revokes_token_and_clears_cookie() {
    let config = common::test_config();
    let components = common::components(&config);
    let app = init_app!(config, components);

    test::call_service(
        &app,
        register_request("alice123", "a@b.com", STRONG_PASSWORD).to_request(),
    )
    .await;
    let token = login_token!(app, "a@b.com");

    let resp = test::call_service(
        &app,
        bearer(test::TestRequest::post().uri("/api/auth/logout"), &token).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let cleared = resp
        .response()
        .cookies()
        .find(|c| c.name() == "accessToken")
        .expect("removal cookie");
    assert!(cleared.value().is_empty());
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Logged out successfully");

    // Any gated route now refuses the same token
    for request in [
        test::TestRequest::get().uri("/api/auth/me"),
        test::TestRequest::get().uri("/api/payments"),
        test::TestRequest::post().uri("/api/auth/logout"),
    ] {
        let resp = test::call_service(&app, bearer(request, &token).to_request()).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body: Value = test::read_body_json(resp).await;
        assert!(body["message"].as_str().unwrap_or_default().contains("revoked"));
    }

    // A fresh login still works
    let fresh = login_token!(app, "a@b.com");
    let resp = test::call_service(
        &app,
        bearer(test::TestRequest::get().uri("/api/auth/me"), &fresh).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_logout_requires_token() {
    let config = common::test_config();
    let components = common::components(&config);
    let app = init_app!(config, components);

    let resp = test::call_service(
        &app,
        test::TestRequest::post().uri("/api/auth/logout").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_malformed_json_is_bad_request() {
    let config = common::test_config();
    let components = common::components(&config);
    let app = init_app!(config, components);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/auth/login")
            .insert_header(("content-type", "application/json"))
            .set_payload("{not json")
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_health_and_unknown_route() {
    let config = common::test_config();
    let components = common::components(&config);
    let app = init_app!(config, components);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "healthy");

    let resp = test::call_service(&app, test::TestRequest::get().uri("/api/nope").to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_register_rejects_taken_username() {
    let config = common::test_config();
    let components = common::components(&config);
    let app = init_app!(config, components);

    let resp = test::call_service(
        &app,
        register_request("alice123", "a@b.com", STRONG_PASSWORD).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = test::call_service(
        &app,
        register_request("alice123", "other@b.com", STRONG_PASSWORD).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Username already taken");

    // the losing attempt created nothing, so its email stays free
    let resp = test::call_service(&app, login_request("other@b.com", STRONG_PASSWORD).to_request()).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}
