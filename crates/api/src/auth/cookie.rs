//! The `session-token` cookie: parsing and `Set-Cookie` values.

use axum::http::header::COOKIE;
use axum::http::HeaderMap;

use super::session::SessionConfig;

/// Name of the cookie that carries the signed session token.
pub const SESSION_COOKIE: &str = "session-token";

/// Attributes shared by every session cookie we set.
const BASE_ATTRIBUTES: &str = "Path=/; HttpOnly; SameSite=Lax";

/// Find a cookie by name across all `Cookie` headers.
///
/// Returns `None` for a missing or empty value.
pub fn read_cookie<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim())
        .filter(|value| !value.is_empty())
}

/// `Set-Cookie` value that stores `token` for the session lifetime.
pub fn session_cookie(token: &str, config: &SessionConfig) -> String {
    let mut cookie = format!(
        "{SESSION_COOKIE}={token}; {BASE_ATTRIBUTES}; Max-Age={}",
        config.ttl_secs()
    );
    if config.secure_cookie {
        cookie.push_str("; Secure");
    }
    cookie
}

/// `Set-Cookie` value that clears the session cookie immediately.
pub fn cleared_session_cookie(secure: bool) -> String {
    let mut cookie = format!("{SESSION_COOKIE}=; {BASE_ATTRIBUTES}; Max-Age=0");
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}
