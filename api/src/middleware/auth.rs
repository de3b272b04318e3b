//! Authentication middleware for protecting API endpoints.
//!
//! The token is read from the `accessToken` cookie, then the `x-auth-token`
//! header, then the `Authorization` header (a `Bearer ` prefix is
//! stripped). The verified identity is injected into the request
//! extensions as an [`AuthContext`].

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    web, Error, FromRequest, HttpMessage, HttpRequest, ResponseError,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
};
use uuid::Uuid;

use pa_core::domain::entities::account::Role;
use pa_core::domain::value_objects::Identity;
use pa_core::errors::{DomainError, TokenError};
use pa_core::services::RequestAuthenticator;

use crate::handlers::ApiError;

/// Header checked after the cookie
pub const AUTH_TOKEN_HEADER: &str = "x-auth-token";

/// Shared authenticator handle stored in app data
pub type SharedAuthenticator = Arc<dyn RequestAuthenticator>;

/// Authenticated caller injected into requests
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub identity: Identity,
}

impl AuthContext {
    pub fn account_id(&self) -> Uuid {
        self.identity.account_id
    }

    pub fn role(&self) -> Role {
        self.identity.role
    }
}

/// Authentication middleware factory
pub struct JwtAuth {
    cookie_name: Rc<str>,
}

impl JwtAuth {
    /// Creates the middleware reading the given cookie first
    pub fn new(cookie_name: &str) -> Self {
        Self {
            cookie_name: Rc::from(cookie_name),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
            cookie_name: Rc::clone(&self.cookie_name),
        }))
    }
}

/// Authentication middleware service
pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
    cookie_name: Rc<str>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    actix_web::dev::forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let token = extract_token(&req, &self.cookie_name);

        Box::pin(async move {
            let Some(authenticator) = req.app_data::<web::Data<SharedAuthenticator>>().cloned() else {
                log::error!("No authenticator registered in app data");
                let err = DomainError::Configuration {
                    message: "authenticator missing".to_string(),
                };
                return Ok(reject(req, err.into()));
            };

            match authenticator.authenticate(token.as_deref()).await {
                Ok(identity) => {
                    req.extensions_mut().insert(AuthContext { identity });
                    service.call(req).await.map(ServiceResponse::map_into_left_body)
                }
                Err(err) => Ok(reject(req, err.into())),
            }
        })
    }
}

/// Answer the request with an error body without calling the inner service
pub(crate) fn reject<B>(req: ServiceRequest, err: ApiError) -> ServiceResponse<EitherBody<B>> {
    let response = err.error_response();
    req.into_response(response).map_into_right_body()
}

/// Token from the cookie, then `x-auth-token`, then `Authorization`
pub fn extract_token(req: &ServiceRequest, cookie_name: &str) -> Option<String> {
    if let Some(cookie) = req.cookie(cookie_name) {
        let value = cookie.value().trim();
        if !value.is_empty() {
            return Some(value.to_string());
        }
    }

    [AUTH_TOKEN_HEADER, AUTHORIZATION.as_str()]
        .iter()
        .filter_map(|name| req.headers().get(*name))
        .filter_map(|value| value.to_str().ok())
        .map(|value| value.strip_prefix("Bearer ").unwrap_or(value).trim())
        .find(|value| !value.is_empty())
        .map(str::to_string)
}

/// Extractor for required authentication
impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| ApiError::from(TokenError::Missing).into());

        ready(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{cookie::Cookie, test as actix_test};

    #[test]
    fn test_extract_token_order() {
        let req = actix_test::TestRequest::default()
            .cookie(Cookie::new("accessToken", "from-cookie"))
            .insert_header((AUTH_TOKEN_HEADER, "from-header"))
            .insert_header((AUTHORIZATION, "Bearer from-authorization"))
            .to_srv_request();
        assert_eq!(extract_token(&req, "accessToken").as_deref(), Some("from-cookie"));

        let req = actix_test::TestRequest::default()
            .insert_header((AUTH_TOKEN_HEADER, "from-header"))
            .insert_header((AUTHORIZATION, "Bearer from-authorization"))
            .to_srv_request();
        assert_eq!(extract_token(&req, "accessToken").as_deref(), Some("from-header"));

        let req = actix_test::TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer from-authorization"))
            .to_srv_request();
        assert_eq!(extract_token(&req, "accessToken").as_deref(), Some("from-authorization"));
    }

    #[test]
    fn test_extract_token_without_bearer_prefix() {
        let req = actix_test::TestRequest::default()
            .insert_header((AUTHORIZATION, "raw-token"))
            .to_srv_request();
        assert_eq!(extract_token(&req, "accessToken").as_deref(), Some("raw-token"));
    }

    #[test]
    fn test_extract_token_blank_values_ignored() {
        let req = actix_test::TestRequest::default()
            .cookie(Cookie::new("accessToken", ""))
            .insert_header((AUTHORIZATION, "Bearer "))
            .to_srv_request();
        assert_eq!(extract_token(&req, "accessToken"), None);

        let req = actix_test::TestRequest::default().to_srv_request();
        assert_eq!(extract_token(&req, "accessToken"), None);
    }
}
