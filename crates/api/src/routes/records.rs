//! Route definitions for the caller's property and mortgage records.

use axum::routing::get;
use axum::Router;

use crate::handlers::records;
use crate::state::AppState;

/// Routes merged at the API root.
///
/// ```text
/// GET /properties  -> list_properties (requires auth)
/// GET /mortgages   -> list_mortgages (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/properties", get(records::list_properties))
        .route("/mortgages", get(records::list_mortgages))
}
