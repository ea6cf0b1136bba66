//! Route definitions for the `/transactions` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::transactions;
use crate::state::AppState;

/// Routes mounted at `/transactions`.
///
/// ```text
/// GET /  -> list_transactions (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(transactions::list_transactions))
}
