use std::sync::Arc;

use mangalib_core::catalog::Catalog;
use mangalib_core::search_session::SearchSession;
use tokio::sync::Mutex;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: mangalib_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// External catalog (Jikan in production, fakes in tests).
    pub catalog: Arc<dyn Catalog>,
    /// The process-wide search session. One lock covers each whole session
    /// operation, including the catalog call of a search, so a resolve can
    /// never observe a half-replaced page.
    pub search_session: Arc<Mutex<SearchSession>>,
}

impl AppState {
    pub fn new(
        pool: mangalib_db::DbPool,
        config: ServerConfig,
        catalog: Arc<dyn Catalog>,
    ) -> Self {
        Self {
            pool,
            config: Arc::new(config),
            catalog,
            search_session: Arc::new(Mutex::new(SearchSession::new())),
        }
    }
}
