//! Handlers for property and mortgage records.
//!
//! Both listings are scoped to the session user.

use axum::extract::State;
use axum::Json;
use columbia_db::models::mortgage::Mortgage;
use columbia_db::models::property::Property;
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::auth::SessionUser;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct PropertiesResponse {
    pub properties: Vec<Property>,
}

#[derive(Debug, Serialize)]
pub struct MortgagesResponse {
    pub mortgages: Vec<Mortgage>,
}

/// GET /api/properties
pub async fn list_properties(
    session: SessionUser,
    State(state): State<AppState>,
) -> AppResult<Json<PropertiesResponse>> {
    let properties = state.store.list_properties(session.user_id).await?;
    Ok(Json(PropertiesResponse { properties }))
}

/// GET /api/mortgages
pub async fn list_mortgages(
    session: SessionUser,
    State(state): State<AppState>,
) -> AppResult<Json<MortgagesResponse>> {
    let mortgages = state.store.list_mortgages(session.user_id).await?;
    Ok(Json(MortgagesResponse { mortgages }))
}
