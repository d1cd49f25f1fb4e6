use std::sync::Arc;

use tokio::sync::Mutex;

use pvptracker_db::store::StudentStore;
use pvptracker_pipeline::config::IngestConfig;
use pvptracker_pipeline::feed::FeedSource;

use crate::auth::rate_limit::LoginRateLimiter;
use crate::auth::session::SessionStore;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; everything shared lives behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub pool: pvptracker_db::DbPool,
    pub config: Arc<ServerConfig>,
    /// Roster store used by the sync endpoint.
    pub store: Arc<dyn StudentStore>,
    /// Where roster feeds are fetched from.
    pub feeds: Arc<dyn FeedSource>,
    pub ingest: Arc<IngestConfig>,
    /// Held for the whole of a roster sync; imports never overlap.
    pub sync_lock: Arc<Mutex<()>>,
    pub sessions: Arc<SessionStore>,
    pub login_limiter: Arc<LoginRateLimiter>,
}

impl AppState {
    /// Assemble state around an already-prepared pool.
    pub fn new(
        pool: pvptracker_db::DbPool,
        config: ServerConfig,
        feeds: Arc<dyn FeedSource>,
        ingest: IngestConfig,
    ) -> Self {
        let sessions = SessionStore::new(config.auth.session_ttl);
        let login_limiter =
            LoginRateLimiter::new(config.auth.login_max_attempts, config.auth.login_window);
        Self {
            store: Arc::new(pvptracker_db::store::SqliteStore::new(pool.clone())),
            pool,
            config: Arc::new(config),
            feeds,
            ingest: Arc::new(ingest),
            sync_lock: Arc::new(Mutex::new(())),
            sessions: Arc::new(sessions),
            login_limiter: Arc::new(login_limiter),
        }
    }
}
