//! Role gate applied after [`JwtAuth`](super::auth::JwtAuth)
//!
//! Routes wrap it as `.wrap(RequireRole::new(role)).wrap(JwtAuth::new(..))`
//! so authentication runs first. Without an [`AuthContext`] the gate
//! answers 401; with the wrong role, 403.

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpMessage,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
};

use pa_core::domain::entities::account::Role;
use pa_core::errors::TokenError;
use pa_core::services::require_role;

use super::auth::{reject, AuthContext};

/// Role gate middleware factory
pub struct RequireRole {
    role: Role,
}

impl RequireRole {
    pub fn new(role: Role) -> Self {
        Self { role }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireRole
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireRoleMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireRoleMiddleware {
            service: Rc::new(service),
            role: self.role,
        }))
    }
}

pub struct RequireRoleMiddleware<S> {
    service: Rc<S>,
    role: Role,
}

impl<S, B> Service<ServiceRequest> for RequireRoleMiddleware<S>
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
        let required = self.role;

        Box::pin(async move {
            let identity = req
                .extensions()
                .get::<AuthContext>()
                .map(|ctx| ctx.identity.clone());

            let Some(identity) = identity else {
                log::warn!("Role gate reached without an authenticated identity");
                return Ok(reject(req, TokenError::Missing.into()));
            };

            if let Err(err) = require_role(&identity, required) {
                log::debug!(
                    "Denied {} {} for role {} (requires {})",
                    req.method(),
                    req.path(),
                    identity.role,
                    required
                );
                return Ok(reject(req, err.into()));
            }

            service.call(req).await.map(ServiceResponse::map_into_left_body)
        })
    }
}
