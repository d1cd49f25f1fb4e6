//! The roster store seam.
//!
//! Ingestion components receive a `&dyn StudentStore` instead of reaching for
//! a shared pool, so the pipeline can be driven against SQLite in production
//! and against in-memory doubles in tests.

use async_trait::async_trait;
use pvptracker_core::error::CoreError;
use pvptracker_core::roster::StudentFragment;
use pvptracker_core::types::DbId;

use crate::models::student::Student;
use crate::repositories::StudentRepo;
use crate::{schema, DbPool};

/// Errors surfaced by a [`StudentStore`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The fragment was rejected before reaching the database.
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Storage operations the roster pipeline depends on.
#[async_trait]
pub trait StudentStore: Send + Sync {
    /// Create or evolve the schema. Idempotent.
    async fn ensure_schema(&self) -> Result<(), StoreError>;

    /// Atomically insert or merge `fragment` keyed by its canonical name.
    async fn upsert_student(&self, fragment: &StudentFragment) -> Result<Student, StoreError>;

    /// Ids of every stored student.
    async fn student_ids(&self) -> Result<Vec<DbId>, StoreError>;

    /// Overwrite one student's image path. `false` when the id is unknown.
    async fn set_image_path(&self, id: DbId, image_path: &str) -> Result<bool, StoreError>;

    /// Persisted upstream id to canonical name pairs, oldest row first.
    async fn source_index(&self) -> Result<Vec<(i64, String)>, StoreError>;

    /// Every stored student.
    async fn list_students(&self) -> Result<Vec<Student>, StoreError>;
}

/// [`StudentStore`] backed by the application's SQLite pool.
#[derive(Clone)]
pub struct SqliteStore {
    pool: DbPool,
}

impl SqliteStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl StudentStore for SqliteStore {
    async fn ensure_schema(&self) -> Result<(), StoreError> {
        schema::ensure_schema(&self.pool).await?;
        Ok(())
    }

    async fn upsert_student(&self, fragment: &StudentFragment) -> Result<Student, StoreError> {
        let canonical_name = fragment.require_canonical_name()?;
        Ok(StudentRepo::upsert(&self.pool, canonical_name, fragment).await?)
    }

    async fn student_ids(&self) -> Result<Vec<DbId>, StoreError> {
        Ok(StudentRepo::list_ids(&self.pool).await?)
    }

    async fn set_image_path(&self, id: DbId, image_path: &str) -> Result<bool, StoreError> {
        Ok(StudentRepo::set_image_path(&self.pool, id, image_path).await?)
    }

    async fn source_index(&self) -> Result<Vec<(i64, String)>, StoreError> {
        Ok(StudentRepo::list_source_ids(&self.pool).await?)
    }

    async fn list_students(&self) -> Result<Vec<Student>, StoreError> {
        Ok(StudentRepo::list(&self.pool).await?)
    }
}
