use std::path::PathBuf;
use std::time::Duration;

use crate::auth::AuthConfig;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// SQLite database URL.
    pub database_url: String,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Directory of static frontend files served at `/`.
    pub public_dir: PathBuf,
    /// Directory of downloaded portraits served at `/downloaded_images`.
    pub image_dir: PathBuf,
    /// JSON export read by the match import endpoint.
    pub pvp_records_path: PathBuf,
    /// Operator credentials, sessions and login throttling.
    pub auth: AuthConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                              |
    /// |------------------------|--------------------------------------|
    /// | `HOST`                 | `0.0.0.0`                            |
    /// | `PORT`                 | `3000`                               |
    /// | `DATABASE_URL`         | `sqlite://pvp-tracker.db`            |
    /// | `CORS_ORIGINS`         | `http://localhost:3000`              |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                                 |
    /// | `PUBLIC_DIR`           | `public`                             |
    /// | `IMAGE_DIR`            | `downloaded_images`                  |
    /// | `PVP_RECORDS_PATH`     | `pvp_records.json`                   |
    ///
    /// See [`AuthConfig::from_env`] for the auth variables.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let database_url =
            std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://pvp-tracker.db".into());

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let path_var = |name: &str, default: &str| {
            PathBuf::from(std::env::var(name).unwrap_or_else(|_| default.into()))
        };

        Self {
            host,
            port,
            database_url,
            cors_origins,
            request_timeout_secs,
            public_dir: path_var("PUBLIC_DIR", "public"),
            image_dir: path_var("IMAGE_DIR", "downloaded_images"),
            pvp_records_path: path_var("PVP_RECORDS_PATH", "pvp_records.json"),
            auth: AuthConfig::from_env(),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
