//! Repository for the `filings` table.

use columbia_core::types::DbId;
use sqlx::PgPool;

use crate::models::filing::{CreateFiling, Filing};

const COLUMNS: &str = "id, user_id, filing_type, status, payload, created_at";

pub struct FilingRepo;

impl FilingRepo {
    /// Insert a new filing, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateFiling) -> Result<Filing, sqlx::Error> {
        let query = format!(
            "INSERT INTO filings (user_id, filing_type, status, payload)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Filing>(&query)
            .bind(input.user_id)
            .bind(&input.filing_type)
            .bind(&input.status)
            .bind(&input.payload)
            .fetch_one(pool)
            .await
    }

    /// Filings submitted by `user_id`, newest first.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Filing>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM filings
             WHERE user_id = $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Filing>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }
}
