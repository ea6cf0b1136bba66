//! Access to the store of record.
//!
//! Handlers talk to a [`SharedStore`]; [`connect`] picks the backend from the
//! configured URL.

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;

pub mod config;
pub mod error;
pub mod memory;
pub mod models;
pub mod pg;
pub mod repositories;
pub mod rest;
pub mod store;

pub use config::DatabaseConfig;
pub use error::StoreError;
pub use store::{DataStore, SharedStore};

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await
}

/// Round-trip a trivial query to confirm the pool is usable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply pending migrations from `crates/db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Open the store described by `config`.
///
/// The Postgres backend also applies pending migrations.
pub async fn connect(config: &DatabaseConfig) -> Result<SharedStore, StoreError> {
    let url = config.url.as_str();

    if url.starts_with("postgres://") || url.starts_with("postgresql://") {
        let pool = create_pool(url).await?;
        tracing::info!("Database connection pool created");
        run_migrations(&pool).await?;
        tracing::info!("Database migrations applied");
        return Ok(Arc::new(pg::PgStore::new(pool)));
    }

    if url.starts_with("http://") || url.starts_with("https://") {
        tracing::info!("Using hosted data service REST backend");
        return Ok(Arc::new(rest::RestStore::new(config)?));
    }

    if url.starts_with("memory://") {
        tracing::warn!("Using in-memory store; data is lost on restart");
        return Ok(Arc::new(memory::MemoryStore::new()));
    }

    Err(StoreError::UnsupportedUrl(url.to_string()))
}
