use serde::{Deserialize, Serialize};
use validator::Validate;

use pa_core::domain::value_objects::AccountView;
use pa_core::services::{AuthOutcome, LoginCommand, RegisterCommand};

/// Customer self-registration. Missing fields deserialize as empty strings
/// so the credential store reports which one is required.
#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default, alias = "username")]
    pub display_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl From<RegisterRequest> for RegisterCommand {
    fn from(request: RegisterRequest) -> Self {
        RegisterCommand {
            display_name: request.display_name,
            email: request.email,
            password: request.password,
        }
    }
}

#[derive(Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

impl From<LoginRequest> for LoginCommand {
    fn from(request: LoginRequest) -> Self {
        LoginCommand {
            email: request.email,
            password: request.password,
        }
    }
}

/// Register and login response: the safe account view plus the token
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    #[serde(flatten)]
    pub account: AccountView,
    pub token: String,
    pub expires_in: i64,
}

impl From<AuthOutcome> for AuthResponse {
    fn from(outcome: AuthOutcome) -> Self {
        Self {
            account: outcome.account,
            token: outcome.token.token,
            expires_in: outcome.token.expires_in,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
