//! Route definitions for the `/efile` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::efile;
use crate::state::AppState;

/// Routes mounted at `/efile`.
///
/// ```text
/// GET  /          -> list_filings
/// POST /          -> submit
/// POST /validate  -> validate
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(efile::list_filings).post(efile::submit))
        .route("/validate", post(efile::validate))
}
