//! Ledger transaction model.

use columbia_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `transactions` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Transaction {
    pub id: DbId,
    pub user_id: DbId,
    /// e.g. `deposit`, `withdrawal`, `mortgage_payment`.
    pub kind: String,
    /// Signed amount in whole in-game currency units.
    pub amount: i64,
    pub description: Option<String>,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateTransaction {
    pub user_id: DbId,
    pub kind: String,
    pub amount: i64,
    pub description: Option<String>,
}
