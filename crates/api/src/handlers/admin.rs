//! Handlers for the `/admin` resource. Admin role required.

use axum::extract::State;
use axum::Json;
use columbia_core::user::UserRecord;
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct UsersResponse {
    pub users: Vec<UserRecord>,
}

/// GET /api/admin/users
pub async fn list_users(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<UsersResponse>> {
    let users = state.store.list_users().await?;
    tracing::info!(admin_id = admin.id, count = users.len(), "Listed users");
    Ok(Json(UsersResponse {
        users: users.into_iter().map(|u| u.into_record()).collect(),
    }))
}
