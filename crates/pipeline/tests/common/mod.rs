//! Shared test doubles for the pipeline integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use pvptracker_core::roster::StudentFragment;
use pvptracker_core::types::DbId;
use pvptracker_db::models::student::Student;
use pvptracker_db::store::{SqliteStore, StoreError, StudentStore};
use pvptracker_pipeline::feed::{FeedError, FeedSource};

pub fn feed_url(locale: &str) -> String {
    format!("https://feeds.test/data/{locale}/students.json")
}

/// Feed source serving canned bodies; unknown addresses fail with 503.
#[derive(Default)]
pub struct StaticFeedSource {
    bodies: HashMap<String, serde_json::Value>,
    requests: Mutex<Vec<String>>,
}

impl StaticFeedSource {
    pub fn with(mut self, locale: &str, body: serde_json::Value) -> Self {
        self.bodies.insert(feed_url(locale), body);
        self
    }

    /// Addresses requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl FeedSource for StaticFeedSource {
    async fn fetch(&self, url: &str) -> Result<Vec<serde_json::Value>, FeedError> {
        self.requests.lock().unwrap().push(url.to_string());
        match self.bodies.get(url) {
            Some(serde_json::Value::Array(items)) => Ok(items.clone()),
            Some(other) => Err(FeedError::Malformed(format!("not an array: {other}"))),
            None => Err(FeedError::Status { status: 503 }),
        }
    }
}

/// SQLite store that rejects upserts for selected names and image writes
/// for selected ids.
pub struct FaultyStore {
    pub inner: SqliteStore,
    pub reject_names: Vec<String>,
    pub reject_image_ids: Vec<DbId>,
}

#[async_trait]
impl StudentStore for FaultyStore {
    async fn ensure_schema(&self) -> Result<(), StoreError> {
        self.inner.ensure_schema().await
    }

    async fn upsert_student(&self, fragment: &StudentFragment) -> Result<Student, StoreError> {
        if self.reject_names.contains(&fragment.name) {
            return Err(StoreError::Database(sqlx::Error::Protocol(format!(
                "rejected {}",
                fragment.name
            ))));
        }
        self.inner.upsert_student(fragment).await
    }

    async fn student_ids(&self) -> Result<Vec<DbId>, StoreError> {
        self.inner.student_ids().await
    }

    async fn set_image_path(&self, id: DbId, image_path: &str) -> Result<bool, StoreError> {
        if self.reject_image_ids.contains(&id) {
            return Err(StoreError::Database(sqlx::Error::Protocol(format!(
                "rejected image for {id}"
            ))));
        }
        self.inner.set_image_path(id, image_path).await
    }

    async fn source_index(&self) -> Result<Vec<(i64, String)>, StoreError> {
        self.inner.source_index().await
    }

    async fn list_students(&self) -> Result<Vec<Student>, StoreError> {
        self.inner.list_students().await
    }
}

pub async fn sqlite_store() -> SqliteStore {
    let pool = pvptracker_db::create_memory_pool().await.unwrap();
    let store = SqliteStore::new(pool);
    store.ensure_schema().await.unwrap();
    store
}

pub async fn find(store: &dyn StudentStore, canonical_name: &str) -> Option<Student> {
    store
        .list_students()
        .await
        .unwrap()
        .into_iter()
        .find(|s| s.canonical_name == canonical_name)
}
