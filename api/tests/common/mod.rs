//! Shared setup for API integration tests

#![allow(dead_code)]

use actix_web::test::TestRequest;
use serde_json::json;

use pa_api::server::{build_components, Components, Stores};
use pa_core::domain::entities::account::Role;
use pa_core::services::CreateStaffCommand;
use pa_infra::memory::{
    InMemoryAccountRepository, InMemoryPaymentRepository, InMemoryRevocationRepository,
};
use pa_shared::config::{AppConfig, MIN_BCRYPT_COST};

pub const STRONG_PASSWORD: &str = "Str0ng!Pass";
pub const ADMIN_EMAIL: &str = "root@payapprove.test";
pub const EMPLOYEE_EMAIL: &str = "clerk@payapprove.test";

pub type MemoryComponents =
    Components<InMemoryAccountRepository, InMemoryRevocationRepository, InMemoryPaymentRepository>;

pub fn test_config() -> AppConfig {
    let mut config = AppConfig::for_testing("integration-test-secret");
    config.auth.password.bcrypt_cost = MIN_BCRYPT_COST;
    config
}

pub fn components(config: &AppConfig) -> MemoryComponents {
    build_components(config, Stores::in_memory()).expect("Failed to build components")
}

/// Seed an admin and an employee directly through the staff service
pub async fn seed_staff(components: &MemoryComponents) {
    components
        .state
        .staff
        .bootstrap_admin("rootadmin".to_string(), ADMIN_EMAIL.to_string(), STRONG_PASSWORD.to_string())
        .await
        .expect("Failed to seed admin");

    components
        .state
        .staff
        .create(CreateStaffCommand {
            display_name: "clerk".to_string(),
            email: EMPLOYEE_EMAIL.to_string(),
            password: STRONG_PASSWORD.to_string(),
            role: Some(Role::Employee),
        })
        .await
        .expect("Failed to seed employee");
}

pub fn register_request(display_name: &str, email: &str, password: &str) -> TestRequest {
    TestRequest::post().uri("/api/auth/register").set_json(json!({
        "displayName": display_name,
        "email": email,
        "password": password,
    }))
}

pub fn login_request(email: &str, password: &str) -> TestRequest {
    TestRequest::post().uri("/api/auth/login").set_json(json!({
        "email": email,
        "password": password,
    }))
}

pub fn bearer(request: TestRequest, token: &str) -> TestRequest {
    request.insert_header(("Authorization", format!("Bearer {}", token)))
}

/// Initialize the full application over the given components
macro_rules! init_app {
    ($config:expr, $components:expr) => {
        actix_web::test::init_service(pa_api::app::create_app(
            &$config,
            $components.state.clone(),
            $components.authenticator.clone(),
            $components.rate_limiter.clone(),
        ))
        .await
    };
}

/// Log in with the shared strong password and return the token
macro_rules! login_token {
    ($app:expr, $email:expr) => {{
        let body: serde_json::Value = actix_web::test::call_and_read_body_json(
            &$app,
            common::login_request($email, common::STRONG_PASSWORD).to_request(),
        )
        .await;
        body["token"]
            .as_str()
            .expect("login response carries a token")
            .to_string()
    }};
}
