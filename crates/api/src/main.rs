use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pvptracker_api::auth::password::hash_password;
use pvptracker_api::config::ServerConfig;
use pvptracker_api::router::build_app_router;
use pvptracker_api::state::AppState;
use pvptracker_db::store::StudentStore;
use pvptracker_pipeline::config::IngestConfig;
use pvptracker_pipeline::feed::HttpFeedSource;

/// How often expired sessions are swept from memory.
const SESSION_PURGE_INTERVAL: Duration = Duration::from_secs(15 * 60);

#[tokio::main]
async fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if let [command, password] = args.as_slice() {
        if command == "hash-password" {
            let hash = hash_password(password).expect("Failed to hash password");
            println!("{hash}");
            return;
        }
    }

    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "pvptracker_api=debug,pvptracker_pipeline=info,access=info,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    let ingest = IngestConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let pool = pvptracker_db::create_pool(&config.database_url)
        .await
        .expect("Failed to open database");
    tracing::info!(url = %config.database_url, "Database connection pool created");

    pvptracker_db::health_check(&pool)
        .await
        .expect("Database health check failed");

    let feeds = Arc::new(
        HttpFeedSource::new(ingest.feed_timeout).expect("Failed to build feed HTTP client"),
    );
    let state = AppState::new(pool, config.clone(), feeds, ingest);

    state
        .store
        .ensure_schema()
        .await
        .expect("Failed to ensure database schema");
    tracing::info!("Database schema ready");

    // --- Roster sync (background) ---
    let sync_state = state.clone();
    let sync_handle = tokio::spawn(async move {
        let _running = sync_state.sync_lock.lock().await;
        let (import, backfill) = pvptracker_pipeline::sync_roster(
            sync_state.store.as_ref(),
            sync_state.feeds.as_ref(),
            &sync_state.ingest.feed_urls,
        )
        .await;
        tracing::info!(
            upserted = import.upserted(),
            skipped = import.skipped(),
            failed_feeds = ?import.failed_feeds(),
            images_updated = backfill.updated,
            "Startup roster sync finished"
        );
    });

    // --- Session sweeper ---
    let sessions = Arc::clone(&state.sessions);
    let purge_handle = tokio::spawn(async move {
        let mut interval = tokio::time::interval(SESSION_PURGE_INTERVAL);
        loop {
            interval.tick().await;
            let purged = sessions.purge_expired().await;
            if purged > 0 {
                tracing::debug!(purged, "Purged expired sessions");
            }
        }
    });

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .expect("Server error");

    tracing::info!("Server stopped accepting connections, cleaning up");
    purge_handle.abort();
    sync_handle.abort();
    tracing::info!("Graceful shutdown complete");
}

/// Resolve on SIGINT, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Received Ctrl-C, starting graceful shutdown"),
        () = terminate => tracing::info!("Received SIGTERM, starting graceful shutdown"),
    }
}
