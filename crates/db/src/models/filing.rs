//! E-file submission model.

use columbia_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `filings` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Filing {
    pub id: DbId,
    pub user_id: DbId,
    pub filing_type: String,
    pub status: String,
    /// The validated wizard draft, stored verbatim.
    pub payload: serde_json::Value,
    pub created_at: Timestamp,
}

/// DTO for inserting a filing.
#[derive(Debug, Clone, Serialize)]
pub struct CreateFiling {
    pub user_id: DbId,
    pub filing_type: String,
    pub status: String,
    pub payload: serde_json::Value,
}
