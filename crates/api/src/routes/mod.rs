pub mod admin;
pub mod auth;
pub mod efile;
pub mod health;
pub mod records;
pub mod transactions;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /config                 public client configuration (public)
///
/// /auth/me                current user (auth required)
/// /auth/logout            clear the session cookie (public)
///
/// /transactions           caller's most recent transactions
/// /properties             caller's properties
/// /mortgages              caller's mortgages
///
/// /efile                  list, submit filings
/// /efile/validate         validate one wizard step
///
/// /admin/users            list users (admin only)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/config", get(handlers::public_config::public_config))
        .nest("/auth", auth::router())
        .nest("/transactions", transactions::router())
        .merge(records::router())
        .nest("/efile", efile::router())
        .nest("/admin", admin::router())
}
