//! Browser-safe configuration.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::config::Environment;
use crate::state::AppState;

/// Settings the browser needs to talk to the data service directly.
///
/// Never includes the service key.
#[derive(Debug, Serialize)]
pub struct PublicConfig {
    pub database_url: String,
    pub public_key: String,
    pub environment: Environment,
}

/// GET /api/config
pub async fn public_config(State(state): State<AppState>) -> Json<PublicConfig> {
    let config = &state.config;
    Json(PublicConfig {
        database_url: config.database.url.clone(),
        public_key: config.database.public_key.clone(),
        environment: config.environment,
    })
}
