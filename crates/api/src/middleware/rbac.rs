//! Role-based access control (RBAC) extractors.
//!
//! The role is always re-read from the store by the session's user id; the
//! session token carries no role. A user deleted since the session was issued
//! is treated as unauthenticated.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use columbia_core::error::CoreError;
use columbia_core::roles::{can_access, Role};
use columbia_db::models::user::User;

use super::auth::{SessionUser, NOT_AUTHENTICATED};
use crate::error::AppError;
use crate::state::AppState;

/// Resolve the session and load the user, requiring at least `required`.
async fn require_role(
    parts: &mut Parts,
    state: &AppState,
    required: Role,
) -> Result<User, AppError> {
    let session = SessionUser::from_request_parts(parts, state).await?;

    let user = state
        .store
        .find_user(session.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized(NOT_AUTHENTICATED.into())))?;

    if !can_access(user.role(), required) {
        tracing::info!(
            user_id = user.id,
            role = %user.role(),
            required = %required,
            "Insufficient role"
        );
        return Err(AppError::Core(CoreError::Forbidden(format!(
            "{required} role required"
        ))));
    }
    Ok(user)
}

/// Requires the `admin` role. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(user): RequireAdmin) -> AppResult<Json<()>> {
///     // user is guaranteed to be an admin here
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub User);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        require_role(parts, state, Role::Admin).await.map(RequireAdmin)
    }
}
