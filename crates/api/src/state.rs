use std::sync::Arc;

use columbia_db::SharedStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`). It holds no
/// per-request mutable data.
#[derive(Clone)]
pub struct AppState {
    /// The store of record.
    pub store: SharedStore,
    /// Server configuration (session signing, cookie policy, public config).
    pub config: Arc<ServerConfig>,
}
