//! Mapping from domain errors to HTTP responses
//!
//! Every failure leaving the API goes through [`ApiError`], so status codes
//! and client messages are decided in one place.

use actix_web::{
    http::{header, StatusCode},
    HttpResponse, ResponseError,
};
use validator::{Validate, ValidationErrors};

use pa_core::errors::{AuthError, DomainError, TokenError, ValidationError};
use pa_shared::{error_codes, ErrorResponse};

/// Message for any token rejected for its content
const INVALID_TOKEN_MESSAGE: &str = "Token is not valid";
/// Message for storage and configuration failures; details are only logged
const SERVER_ERROR_MESSAGE: &str = "Server error";

/// Error type returned by handlers and middleware
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Request body failed shape checks before reaching the services
    #[error("{message}")]
    BadRequest {
        message: String,
        field: Option<String>,
    },

    /// Client exhausted its request budget for the current window
    #[error("Too many requests, please try again later.")]
    TooManyRequests { retry_after_seconds: u64 },
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest {
            message: message.into(),
            field: None,
        }
    }

    /// Status, error code and client message
    fn parts(&self) -> (StatusCode, &'static str, String) {
        let domain = match self {
            ApiError::BadRequest { message, .. } => {
                return (StatusCode::BAD_REQUEST, error_codes::BAD_REQUEST, message.clone())
            }
            ApiError::TooManyRequests { .. } => {
                return (
                    StatusCode::TOO_MANY_REQUESTS,
                    error_codes::RATE_LIMITED,
                    self.to_string(),
                )
            }
            ApiError::Domain(domain) => domain,
        };

        match domain {
            DomainError::Validation { message } => (
                StatusCode::BAD_REQUEST,
                error_codes::VALIDATION_ERROR,
                message.clone(),
            ),
            DomainError::ValidationErr(err) => (
                StatusCode::BAD_REQUEST,
                error_codes::VALIDATION_ERROR,
                validation_message(err),
            ),
            DomainError::Auth(AuthError::DuplicateEmail) => (
                StatusCode::CONFLICT,
                error_codes::CONFLICT,
                AuthError::DuplicateEmail.to_string(),
            ),
            DomainError::Auth(AuthError::DuplicateDisplayName) => (
                StatusCode::CONFLICT,
                error_codes::CONFLICT,
                AuthError::DuplicateDisplayName.to_string(),
            ),
            DomainError::Auth(AuthError::InvalidCredentials) => (
                StatusCode::UNAUTHORIZED,
                error_codes::INVALID_CREDENTIALS,
                AuthError::InvalidCredentials.to_string(),
            ),
            DomainError::Auth(AuthError::AccessDenied) => (
                StatusCode::FORBIDDEN,
                error_codes::FORBIDDEN,
                AuthError::AccessDenied.to_string(),
            ),
            DomainError::Token(TokenError::Missing) => (
                StatusCode::UNAUTHORIZED,
                error_codes::TOKEN_MISSING,
                TokenError::Missing.to_string(),
            ),
            DomainError::Token(TokenError::Revoked) => (
                StatusCode::UNAUTHORIZED,
                error_codes::TOKEN_REVOKED,
                TokenError::Revoked.to_string(),
            ),
            DomainError::Token(TokenError::GenerationFailed) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                error_codes::INTERNAL_ERROR,
                SERVER_ERROR_MESSAGE.to_string(),
            ),
            DomainError::Token(_) => (
                StatusCode::UNAUTHORIZED,
                error_codes::TOKEN_INVALID,
                INVALID_TOKEN_MESSAGE.to_string(),
            ),
            DomainError::NotFound { resource } => (
                StatusCode::NOT_FOUND,
                error_codes::NOT_FOUND,
                format!("{} not found", resource),
            ),
            DomainError::Internal { .. } | DomainError::Configuration { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                error_codes::INTERNAL_ERROR,
                SERVER_ERROR_MESSAGE.to_string(),
            ),
        }
    }
}

/// Client message for a validation failure; business rules surface bare
fn validation_message(err: &ValidationError) -> String {
    match err {
        ValidationError::BusinessRuleViolation { rule } => rule.clone(),
        other => other.to_string(),
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Domain(err.into())
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        ApiError::Domain(err.into())
    }
}

impl From<TokenError> for ApiError {
    fn from(err: TokenError) -> Self {
        ApiError::Domain(err.into())
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by_key(|(field, _)| field.to_string());

        let first = fields.first().and_then(|(field, errs)| {
            errs.first().map(|e| {
                let message = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid {}", field));
                (field.to_string(), message)
            })
        });

        match first {
            Some((field, message)) => ApiError::BadRequest {
                message,
                field: Some(field),
            },
            None => ApiError::bad_request("Invalid request"),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        self.parts().0
    }

    fn error_response(&self) -> HttpResponse {
        let (status, code, message) = self.parts();

        if status.is_server_error() {
            log::error!("Request failed: {}", self);
        } else {
            log::debug!("Request rejected ({}): {}", status.as_u16(), message);
        }

        let mut body = ErrorResponse::new(code, message);
        if let ApiError::BadRequest { field: Some(field), .. } = self {
            body = body.add_detail("field", field);
        }

        let mut response = HttpResponse::build(status);
        if let ApiError::TooManyRequests { retry_after_seconds } = self {
            response.insert_header((header::RETRY_AFTER, retry_after_seconds.to_string()));
        }
        response.json(body)
    }
}

/// Run `validator` checks on a request body
pub fn validate_request<T: Validate>(request: &T) -> Result<(), ApiError> {
    request.validate().map_err(ApiError::from)
}
