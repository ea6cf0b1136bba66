//! Repository for the `properties` table.

use columbia_core::types::DbId;
use sqlx::PgPool;

use crate::models::property::Property;

const COLUMNS: &str = "id, owner_id, address, parcel_id, assessed_value, created_at";

pub struct PropertyRepo;

impl PropertyRepo {
    /// Properties owned by `owner_id`, newest first.
    pub async fn list_for_owner(
        pool: &PgPool,
        owner_id: DbId,
    ) -> Result<Vec<Property>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM properties
             WHERE owner_id = $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Property>(&query)
            .bind(owner_id)
            .fetch_all(pool)
            .await
    }
}
