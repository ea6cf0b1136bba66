//! Handlers for the `/auth` resource (who am I, logout).

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::response::IntoResponse;
use axum::Json;
use columbia_core::error::CoreError;
use columbia_core::user::UserRecord;
use serde::Serialize;

use crate::auth::cookie::cleared_session_cookie;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::{SessionUser, NOT_AUTHENTICATED};
use crate::state::AppState;

/// Response body for `GET /auth/me`.
#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub user: UserRecord,
}

/// Response body for `POST /auth/logout`.
#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub success: bool,
}

/// GET /api/auth/me
///
/// Re-reads the user by the id in the verified session. Returns 404 if the
/// user has since been deleted. Any store failure is reported as 401 so the
/// client falls back to the signed-out state.
pub async fn me(session: SessionUser, State(state): State<AppState>) -> AppResult<Json<MeResponse>> {
    let user = match state.store.find_user(session.user_id).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            tracing::info!(user_id = session.user_id, "Session refers to a missing user");
            return Err(AppError::Core(CoreError::NotFound {
                entity: "User",
                id: session.user_id,
            }));
        }
        Err(e) => {
            tracing::error!(user_id = session.user_id, error = %e, "Failed to load session user");
            return Err(AppError::Core(CoreError::Unauthorized(
                NOT_AUTHENTICATED.into(),
            )));
        }
    };

    Ok(Json(MeResponse {
        user: user.into_record(),
    }))
}

/// POST /api/auth/logout
///
/// Clears the session cookie. Needs no body and no valid session, so a
/// client holding an expired cookie can still sign out.
pub async fn logout(State(state): State<AppState>) -> impl IntoResponse {
    tracing::info!("Clearing session cookie");
    (
        [(SET_COOKIE, cleared_session_cookie(state.config.is_production()))],
        Json(LogoutResponse { success: true }),
    )
}
