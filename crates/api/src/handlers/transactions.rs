//! Handlers for the `/transactions` resource.

use axum::extract::State;
use axum::Json;
use columbia_db::models::transaction::Transaction;
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::auth::SessionUser;
use crate::state::AppState;

/// Fixed page size for the transaction feed.
pub const TRANSACTION_PAGE_SIZE: i64 = 50;

#[derive(Debug, Serialize)]
pub struct TransactionsResponse {
    pub transactions: Vec<Transaction>,
}

/// GET /api/transactions
///
/// The caller's newest transactions, at most [`TRANSACTION_PAGE_SIZE`].
pub async fn list_transactions(
    session: SessionUser,
    State(state): State<AppState>,
) -> AppResult<Json<TransactionsResponse>> {
    let transactions = state
        .store
        .list_transactions(session.user_id, TRANSACTION_PAGE_SIZE)
        .await?;

    tracing::debug!(
        user_id = session.user_id,
        count = transactions.len(),
        "Loaded transactions"
    );

    Ok(Json(TransactionsResponse { transactions }))
}
