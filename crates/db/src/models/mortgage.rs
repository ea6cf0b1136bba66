//! Mortgage record model.

use columbia_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `mortgages` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Mortgage {
    pub id: DbId,
    pub user_id: DbId,
    pub property_id: DbId,
    pub principal: i64,
    /// Outstanding balance.
    pub balance: i64,
    pub rate_bps: i32,
    pub term_months: i32,
    /// `active`, `paid_off`, or `defaulted`.
    pub status: String,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateMortgage {
    pub user_id: DbId,
    pub property_id: DbId,
    pub principal: i64,
    pub rate_bps: i32,
    pub term_months: i32,
}
