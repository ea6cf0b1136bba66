//! Repository for the `mortgages` table.

use columbia_core::types::DbId;
use sqlx::PgPool;

use crate::models::mortgage::Mortgage;

const COLUMNS: &str =
    "id, user_id, property_id, principal, balance, rate_bps, term_months, status, created_at";

pub struct MortgageRepo;

impl MortgageRepo {
    /// Mortgages held by `user_id`, newest first.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Mortgage>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM mortgages
             WHERE user_id = $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Mortgage>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }
}
