/// Connection settings for the store of record.
///
/// `url` picks the backend by scheme:
///
/// | Scheme                      | Backend                          |
/// |-----------------------------|----------------------------------|
/// | `postgres://`, `postgresql://` | [`PgStore`](crate::pg::PgStore) |
/// | `http://`, `https://`       | [`RestStore`](crate::rest::RestStore) |
/// | `memory://`                 | [`MemoryStore`](crate::memory::MemoryStore) |
#[derive(Clone)]
pub struct DatabaseConfig {
    pub url: String,
    /// Key the browser may use for the data service's public API.
    pub public_key: String,
    /// Privileged key. Server-side only: never serialized, never logged.
    pub service_key: String,
}

impl DatabaseConfig {
    /// Load from environment variables.
    ///
    /// | Env Var                | Required | Default |
    /// |------------------------|----------|---------|
    /// | `DATABASE_URL`         | **yes**  | --      |
    /// | `DATABASE_PUBLIC_KEY`  | no       | empty   |
    /// | `DATABASE_SERVICE_KEY` | REST only| empty   |
    ///
    /// # Panics
    ///
    /// Panics if `DATABASE_URL` is missing, or if the REST backend is selected
    /// without a `DATABASE_SERVICE_KEY`.
    pub fn from_env() -> Self {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        let public_key = std::env::var("DATABASE_PUBLIC_KEY").unwrap_or_default();
        let service_key = std::env::var("DATABASE_SERVICE_KEY").unwrap_or_default();

        if url.starts_with("http") {
            assert!(
                !service_key.is_empty(),
                "DATABASE_SERVICE_KEY must be set when DATABASE_URL points at the data service"
            );
        }

        Self {
            url,
            public_key,
            service_key,
        }
    }
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &self.url)
            .field("public_key", &self.public_key)
            .field("service_key", &"[redacted]")
            .finish()
    }
}
