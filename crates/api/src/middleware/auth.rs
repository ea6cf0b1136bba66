//! Session cookie authentication for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use columbia_core::error::CoreError;
use columbia_core::types::DbId;

use crate::auth::cookie::{read_cookie, SESSION_COOKIE};
use crate::auth::session::{verify_session, SessionClaims, SessionConfig};
use crate::error::AppError;
use crate::state::AppState;

/// The only message ever returned for a missing or bad session.
pub const NOT_AUTHENTICATED: &str = "Not authenticated";

/// Resolve the session cookie on a request to its verified claims.
///
/// Fails closed: a missing cookie, an empty value, a malformed token, a bad
/// signature, or an expired token all yield `None`. The reason is logged at
/// debug level and never surfaced to the caller.
pub fn resolve_session(headers: &HeaderMap, config: &SessionConfig) -> Option<SessionClaims> {
    let token = read_cookie(headers, SESSION_COOKIE)?;
    match verify_session(token, config) {
        Ok(claims) => Some(claims),
        Err(e) => {
            tracing::debug!(reason = %e, "Rejected session token");
            None
        }
    }
}

/// Authenticated caller resolved from the `session-token` cookie.
///
/// Carries only the user id from the verified claims. Anything else about the
/// user must be read from the store.
///
/// ```ignore
/// async fn my_handler(session: SessionUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = session.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct SessionUser {
    pub user_id: DbId,
}

impl FromRequestParts<AppState> for SessionUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let claims = resolve_session(&parts.headers, &state.config.session)
            .ok_or_else(|| AppError::Core(CoreError::Unauthorized(NOT_AUTHENTICATED.into())))?;

        Ok(SessionUser {
            user_id: claims.sub,
        })
    }
}

#[cfg(test)]
mod tests {
    use axum::http::header::COOKIE;
    use axum::http::HeaderValue;
    use jsonwebtoken::{encode, EncodingKey, Header};

    use super::*;
    use crate::auth::cookie::cleared_session_cookie;
    use crate::auth::session::issue_session;

    fn test_config() -> SessionConfig {
        SessionConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            ttl_hours: 1,
            secure_cookie: false,
        }
    }

    fn with_cookie(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn valid_cookie_resolves_to_claims() {
        let config = test_config();
        let token = issue_session(7, &config).unwrap();
        let claims = resolve_session(&with_cookie(&format!("session-token={token}")), &config)
            .expect("valid session should resolve");
        assert_eq!(claims.sub, 7);
    }

    #[test]
    fn missing_cookie_is_absent() {
        assert!(resolve_session(&HeaderMap::new(), &test_config()).is_none());
        assert!(resolve_session(&with_cookie("theme=dark"), &test_config()).is_none());
    }

    #[test]
    fn tampered_signature_is_absent() {
        let config = test_config();
        let token = issue_session(7, &config).unwrap();
        let (head, sig) = token.rsplit_once('.').unwrap();
        let flipped = if sig.starts_with('A') { 'B' } else { 'A' };
        let tampered = format!("{head}.{flipped}{}", &sig[1..]);
        assert!(
            resolve_session(&with_cookie(&format!("session-token={tampered}")), &config)
                .is_none()
        );
    }

    #[test]
    fn tampered_payload_is_absent() {
        let config = test_config();
        let token = issue_session(7, &config).unwrap();
        let attacker = SessionConfig {
            secret: "attacker-secret".to_string(),
            ..test_config()
        };
        let forged_token = issue_session(1, &attacker).unwrap();
        // Graft the forged payload onto the genuine signature.
        let genuine: Vec<&str> = token.split('.').collect();
        let forged: Vec<&str> = forged_token.split('.').collect();
        let spliced = format!("{}.{}.{}", genuine[0], forged[1], genuine[2]);
        assert!(
            resolve_session(&with_cookie(&format!("session-token={spliced}")), &config)
                .is_none()
        );
    }

    #[test]
    fn expired_token_is_absent() {
        let config = test_config();
        // No grace period after exp.
        let now = chrono::Utc::now().timestamp();
        let claims = SessionClaims {
            sub: 7,
            iat: now - 3600,
            exp: now - 30,
            jti: "expired".to_string(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .unwrap();
        assert!(resolve_session(&with_cookie(&format!("session-token={token}")), &config).is_none());
    }

    #[test]
    fn malformed_token_is_absent() {
        assert!(resolve_session(&with_cookie("session-token=not-a-jwt"), &test_config()).is_none());
    }

    #[test]
    fn cleared_cookie_resolves_absent() {
        // What a browser sends back after honouring the logout Set-Cookie.
        let cleared = cleared_session_cookie(false);
        let pair = cleared.split(';').next().unwrap();
        assert!(resolve_session(&with_cookie(pair), &test_config()).is_none());
    }
}
