#![allow(dead_code)]

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, LazyLock};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE, SET_COOKIE};
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use pvptracker_api::auth::password::hash_password;
use pvptracker_api::auth::AuthConfig;
use pvptracker_api::config::ServerConfig;
use pvptracker_api::router::build_app_router;
use pvptracker_api::state::AppState;
use pvptracker_core::error::CoreError;
use pvptracker_core::roster::StudentFragment;
use pvptracker_core::types::DbId;
use pvptracker_db::models::student::Student;
use pvptracker_db::store::{StoreError, StudentStore};
use pvptracker_db::DbPool;
use pvptracker_pipeline::config::IngestConfig;
use pvptracker_pipeline::feed::{FeedError, FeedSource};

pub const TEST_USER: &str = "sensei";
pub const TEST_PASSWORD: &str = "schale-office-2021";

/// Hashed once; Argon2 is slow in debug builds.
static TEST_PASSWORD_HASH: LazyLock<String> =
    LazyLock::new(|| hash_password(TEST_PASSWORD).expect("hashing should succeed"));

/// Feed addresses used by sync tests.
pub fn feed_url(locale: &str) -> String {
    format!("https://feeds.test/data/{locale}/students.json")
}

/// Serves canned feed bodies; unknown addresses answer 503.
#[derive(Default)]
pub struct StaticFeeds {
    feeds: HashMap<String, Vec<serde_json::Value>>,
}

impl StaticFeeds {
    pub fn with(mut self, locale: &str, body: serde_json::Value) -> Self {
        let elements = body.as_array().cloned().expect("feed body must be an array");
        self.feeds.insert(feed_url(locale), elements);
        self
    }
}

#[async_trait]
impl FeedSource for StaticFeeds {
    async fn fetch(&self, url: &str) -> Result<Vec<serde_json::Value>, FeedError> {
        self.feeds
            .get(url)
            .cloned()
            .ok_or(FeedError::Status { status: 503 })
    }
}

/// Build a test `ServerConfig` whose files live under `root`.
pub fn test_config(root: PathBuf) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        database_url: "sqlite::memory:".to_string(),
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        public_dir: root.join("public"),
        image_dir: root.join("downloaded_images"),
        pvp_records_path: root.join("pvp_records.json"),
        auth: AuthConfig {
            username: TEST_USER.to_string(),
            password_hash: TEST_PASSWORD_HASH.clone(),
            session_ttl: chrono::Duration::minutes(30),
            login_max_attempts: 5,
            login_window: Duration::from_secs(900),
            secure_cookie: false,
        },
    }
}

/// A fresh in-memory database with the schema in place.
pub async fn test_pool() -> DbPool {
    let pool = pvptracker_db::create_memory_pool()
        .await
        .expect("memory pool should open");
    pvptracker_db::schema::ensure_schema(&pool)
        .await
        .expect("schema should be created");
    pool
}

/// Build the full application router around `pool` with no upstream feeds.
pub fn build_test_app(pool: DbPool, root: PathBuf) -> Router {
    build_test_app_with_feeds(pool, root, StaticFeeds::default(), Vec::new())
}

/// Build the application with canned feeds and the locales to request.
pub fn build_test_app_with_feeds(
    pool: DbPool,
    root: PathBuf,
    feeds: StaticFeeds,
    locales: Vec<&str>,
) -> Router {
    let state = test_state(pool, root, feeds, locales);
    build_app_router(state.clone(), &state.config)
}

/// Application state as `build_test_app_with_feeds` wires it, for tests
/// that need to reach into it before building the router.
pub fn test_state(
    pool: DbPool,
    root: PathBuf,
    feeds: StaticFeeds,
    locales: Vec<&str>,
) -> AppState {
    let config = test_config(root);
    let ingest = IngestConfig {
        feed_urls: locales.into_iter().map(feed_url).collect(),
        feed_timeout: Duration::from_secs(5),
    };
    AppState::new(pool, config, Arc::new(feeds), ingest)
}

/// Store double that serves a fixed roster and accepts no writes.
pub struct FixedRoster(pub Vec<Student>);

#[async_trait]
impl StudentStore for FixedRoster {
    async fn ensure_schema(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn upsert_student(&self, fragment: &StudentFragment) -> Result<Student, StoreError> {
        Err(StoreError::Core(CoreError::Validation(format!(
            "read-only roster rejects '{}'",
            fragment.name
        ))))
    }

    async fn student_ids(&self) -> Result<Vec<DbId>, StoreError> {
        Ok(self.0.iter().map(|s| s.id).collect())
    }

    async fn set_image_path(&self, _id: DbId, _image_path: &str) -> Result<bool, StoreError> {
        Ok(false)
    }

    async fn source_index(&self) -> Result<Vec<(i64, String)>, StoreError> {
        Ok(Vec::new())
    }

    async fn list_students(&self) -> Result<Vec<Student>, StoreError> {
        Ok(self.0.clone())
    }
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_with_cookie(app: Router, uri: &str, cookie: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, Some(cookie)).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body), None).await
}

pub async fn post_json_with_cookie(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    cookie: &str,
) -> Response<Body> {
    send(app, Method::POST, uri, Some(body), Some(cookie)).await
}

pub async fn post_with_cookie(app: Router, uri: &str, cookie: &str) -> Response<Body> {
    send(app, Method::POST, uri, None, Some(cookie)).await
}

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
    cookie: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    let request = match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("response body should be JSON")
}

/// Log in as the test operator and return the `name=value` cookie pair.
pub async fn login(app: Router) -> String {
    let body = serde_json::json!({ "username": TEST_USER, "password": TEST_PASSWORD });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    session_cookie_pair(&response).expect("login must set the session cookie")
}

/// Extract `pvp_session=<token>` from a `Set-Cookie` response header.
pub fn session_cookie_pair(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get(SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(str::to_string)
}
