//! CORS middleware configuration for cross-origin requests.
//!
//! Development allows any origin; production only the configured
//! allow-list. Credentials are always allowed so browsers send the
//! `accessToken` cookie.

use actix_cors::Cors;
use actix_web::http::{header, Method};

use pa_shared::config::{CorsConfig, Environment};

/// Creates a CORS middleware instance for the given environment.
pub fn create_cors(environment: Environment, config: &CorsConfig) -> Cors {
    if environment.is_production() {
        create_production_cors(config)
    } else {
        create_development_cors(config)
    }
}

fn allowed_methods(config: &CorsConfig) -> Vec<Method> {
    config
        .allowed_methods
        .iter()
        .filter_map(|m| Method::from_bytes(m.as_bytes()).ok())
        .collect()
}

fn allowed_headers(config: &CorsConfig) -> Vec<header::HeaderName> {
    config
        .allowed_headers
        .iter()
        .filter_map(|h| header::HeaderName::from_bytes(h.as_bytes()).ok())
        .collect()
}

fn create_development_cors(config: &CorsConfig) -> Cors {
    log::info!("Configuring CORS for development environment");

    Cors::default()
        .allow_any_origin()
        .allowed_methods(allowed_methods(config))
        .allowed_headers(allowed_headers(config))
        .max_age(config.max_age)
        .supports_credentials()
}

fn create_production_cors(config: &CorsConfig) -> Cors {
    log::info!("Configuring CORS for production environment");

    let mut cors = Cors::default()
        .allowed_methods(allowed_methods(config))
        .allowed_headers(allowed_headers(config))
        .max_age(config.max_age);

    if config.allow_credentials {
        cors = cors.supports_credentials();
    }

    for origin in config.allowed_origins.iter().map(|s| s.trim()) {
        if !origin.is_empty() && origin != "*" {
            log::info!("Adding allowed origin: {}", origin);
            cors = cors.allowed_origin(origin);
        }
    }

    cors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_methods_and_headers_parse() {
        let config = CorsConfig::default();
        let methods = allowed_methods(&config);
        assert!(methods.contains(&Method::DELETE));
        let headers = allowed_headers(&config);
        assert!(headers.iter().any(|h| h.as_str() == "x-auth-token"));
    }

    #[test]
    fn test_create_for_each_environment() {
        let config = CorsConfig {
            allowed_origins: vec!["https://app.payapprove.test".to_string()],
            ..CorsConfig::default()
        };
        let _dev = create_cors(Environment::Development, &config);
        let _prod = create_cors(Environment::Production, &config);
    }
}
