//! Property record model.

use columbia_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `properties` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Property {
    pub id: DbId,
    pub owner_id: DbId,
    pub address: String,
    pub parcel_id: String,
    pub assessed_value: i64,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateProperty {
    pub owner_id: DbId,
    pub address: String,
    pub parcel_id: String,
    pub assessed_value: i64,
}
