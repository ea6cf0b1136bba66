//! Repository for the `transactions` table.

use columbia_core::types::DbId;
use sqlx::PgPool;

use crate::models::transaction::Transaction;

const COLUMNS: &str = "id, user_id, kind, amount, description, created_at";

pub struct TransactionRepo;

impl TransactionRepo {
    /// The newest `limit` transactions owned by `user_id`.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        limit: i64,
    ) -> Result<Vec<Transaction>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM transactions
             WHERE user_id = $1
             ORDER BY created_at DESC, id DESC
             LIMIT $2"
        );
        sqlx::query_as::<_, Transaction>(&query)
            .bind(user_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
