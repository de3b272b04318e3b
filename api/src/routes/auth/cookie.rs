use actix_web::cookie::{time::Duration, Cookie, SameSite};

use pa_shared::config::CookieConfig;

fn same_site(config: &CookieConfig) -> SameSite {
    match config.same_site.to_ascii_lowercase().as_str() {
        "strict" => SameSite::Strict,
        "none" => SameSite::None,
        _ => SameSite::Lax,
    }
}

/// Cookie carrying a freshly issued token
pub(crate) fn access_cookie(config: &CookieConfig, token: &str) -> Cookie<'static> {
    Cookie::build(config.name.clone(), token.to_string())
        .path("/")
        .http_only(config.http_only)
        .secure(config.secure)
        .same_site(same_site(config))
        .max_age(Duration::seconds(config.max_age_seconds))
        .finish()
}

/// Expired cookie that makes the browser drop the token
pub(crate) fn cleared_cookie(config: &CookieConfig) -> Cookie<'static> {
    let mut cookie = access_cookie(config, "");
    cookie.make_removal();
    cookie
}
