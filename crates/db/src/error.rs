/// Failure talking to the store of record.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Data service request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The REST data service answered with a non-success status.
    #[error("Data service returned {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("Unsupported DATABASE_URL scheme in '{0}'")]
    UnsupportedUrl(String),
}
