//! Per-client request rate limiting
//!
//! Fixed windows keyed by client IP, held in process memory. One
//! [`RateLimiter`] is built per server and cloned into every worker so
//! all workers draw from the same budget. Requests over budget get 429
//! with a `Retry-After` header.

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::header::{HeaderName, HeaderValue},
    Error,
};
use futures_util::future::LocalBoxFuture;
use std::{
    collections::HashMap,
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
    time::{Duration, Instant},
};
use tokio::sync::Mutex;

use pa_shared::config::RateLimitConfig;

use super::auth::reject;
use crate::handlers::ApiError;

/// Tracked clients before stale windows are pruned
const PRUNE_THRESHOLD: usize = 10_000;

/// Outcome of counting one request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitStatus {
    Allowed { remaining: u32 },
    Exceeded { retry_after_seconds: u64 },
}

#[derive(Debug, Clone, Copy)]
struct Window {
    started: Instant,
    count: u32,
}

/// Rate limiter middleware factory and shared counter store
#[derive(Clone)]
pub struct RateLimiter {
    config: RateLimitConfig,
    window: Duration,
    windows: Arc<Mutex<HashMap<String, Window>>>,
}

impl RateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        let window = Duration::from_secs(config.window_seconds.max(1));
        Self {
            config,
            window,
            windows: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Count one request from `client` against its current window
    pub async fn check(&self, client: &str) -> RateLimitStatus {
        self.check_at(client, Instant::now()).await
    }

    async fn check_at(&self, client: &str, now: Instant) -> RateLimitStatus {
        let limit = self.config.max_requests;
        let mut windows = self.windows.lock().await;

        if windows.len() >= PRUNE_THRESHOLD {
            let span = self.window;
            windows.retain(|_, w| now.duration_since(w.started) < span);
        }

        let window = windows.entry(client.to_string()).or_insert(Window {
            started: now,
            count: 0,
        });
        if now.duration_since(window.started) >= self.window {
            *window = Window {
                started: now,
                count: 0,
            };
        }

        if window.count >= limit {
            let elapsed = now.duration_since(window.started);
            let retry_after = self.window.saturating_sub(elapsed).as_secs().max(1);
            return RateLimitStatus::Exceeded {
                retry_after_seconds: retry_after,
            };
        }

        window.count += 1;
        RateLimitStatus::Allowed {
            remaining: limit - window.count,
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RateLimiter
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RateLimiterMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimiterMiddleware {
            service: Rc::new(service),
            limiter: self.clone(),
        }))
    }
}

pub struct RateLimiterMiddleware<S> {
    service: Rc<S>,
    limiter: RateLimiter,
}

impl<S, B> Service<ServiceRequest> for RateLimiterMiddleware<S>
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
        let limiter = self.limiter.clone();

        Box::pin(async move {
            if !limiter.config.enabled {
                return service.call(req).await.map(ServiceResponse::map_into_left_body);
            }

            let client = client_ip(&req, limiter.config.trust_forwarded_for);
            match limiter.check(&client).await {
                RateLimitStatus::Exceeded {
                    retry_after_seconds,
                } => {
                    log::warn!(
                        "Rate limit exceeded for {} on {} {}",
                        client,
                        req.method(),
                        req.path()
                    );
                    Ok(reject(req, ApiError::TooManyRequests { retry_after_seconds }))
                }
                RateLimitStatus::Allowed { remaining } => {
                    let limit = limiter.config.max_requests;
                    let mut response = service.call(req).await?;
                    let headers = response.headers_mut();
                    headers.insert(
                        HeaderName::from_static("x-ratelimit-limit"),
                        HeaderValue::from(limit),
                    );
                    headers.insert(
                        HeaderName::from_static("x-ratelimit-remaining"),
                        HeaderValue::from(remaining),
                    );
                    Ok(response.map_into_left_body())
                }
            }
        })
    }
}

/// Client address used as the limiter key
///
/// The first `X-Forwarded-For` entry when forwarded headers are trusted,
/// the peer address otherwise.
fn client_ip(req: &ServiceRequest, trust_forwarded_for: bool) -> String {
    if trust_forwarded_for {
        let forwarded = req
            .headers()
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|ip| !ip.is_empty());
        if let Some(ip) = forwarded {
            return ip.to_string();
        }
    }

    req.peer_addr()
        .map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limiter(max_requests: u32, window_seconds: u64) -> RateLimiter {
        RateLimiter::new(RateLimitConfig::new(max_requests, window_seconds))
    }

    #[tokio::test]
    async fn test_budget_is_per_client() {
        let limiter = limiter(2, 60);
        let now = Instant::now();

        assert_eq!(
            limiter.check_at("10.0.0.1", now).await,
            RateLimitStatus::Allowed { remaining: 1 }
        );
        assert_eq!(
            limiter.check_at("10.0.0.1", now).await,
            RateLimitStatus::Allowed { remaining: 0 }
        );
        assert!(matches!(
            limiter.check_at("10.0.0.1", now).await,
            RateLimitStatus::Exceeded { retry_after_seconds: 60 }
        ));
        assert_eq!(
            limiter.check_at("10.0.0.2", now).await,
            RateLimitStatus::Allowed { remaining: 1 }
        );
    }

    #[tokio::test]
    async fn test_window_resets_after_expiry() {
        let limiter = limiter(1, 60);
        let start = Instant::now();

        limiter.check_at("10.0.0.1", start).await;
        assert!(matches!(
            limiter.check_at("10.0.0.1", start + Duration::from_secs(59)).await,
            RateLimitStatus::Exceeded { retry_after_seconds: 1 }
        ));
        assert_eq!(
            limiter.check_at("10.0.0.1", start + Duration::from_secs(60)).await,
            RateLimitStatus::Allowed { remaining: 0 }
        );
    }

    #[tokio::test]
    async fn test_stale_windows_are_pruned() {
        let limiter = limiter(5, 60);
        let start = Instant::now();

        for i in 0..PRUNE_THRESHOLD {
            limiter.check_at(&format!("client-{}", i), start).await;
        }
        assert_eq!(limiter.windows.lock().await.len(), PRUNE_THRESHOLD);

        limiter
            .check_at("late-client", start + Duration::from_secs(61))
            .await;
        assert_eq!(limiter.windows.lock().await.len(), 1);
    }
}
