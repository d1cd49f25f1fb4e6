//! Repository for the `students` table.

use pvptracker_core::locale::Locale;
use pvptracker_core::roster::StudentFragment;
use pvptracker_core::types::DbId;

use crate::models::student::Student;
use crate::DbPool;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, canonical_name, name_en, name_cn, name_jp, name_kr, name_th, \
     name_tw, name_vi, name_zh, bullet_type, image_path, source_id";

/// Build the merge-on-conflict statement for one translation column.
///
/// Only the locale's own column, `bullet_type` and a still-missing
/// `source_id` are touched on conflict; every other column keeps its value.
macro_rules! upsert_sql {
    ($column:literal) => {
        concat!(
            "INSERT INTO students (canonical_name, ",
            $column,
            ", bullet_type, source_id) VALUES (?, ?, ?, ?) \
             ON CONFLICT (canonical_name) DO UPDATE SET ",
            $column,
            " = excluded.",
            $column,
            ", bullet_type = excluded.bullet_type, \
             source_id = COALESCE(students.source_id, excluded.source_id) \
             RETURNING id, canonical_name, name_en, name_cn, name_jp, name_kr, name_th, \
             name_tw, name_vi, name_zh, bullet_type, image_path, source_id"
        )
    };
}

/// The upsert statement for `locale`. The set of statements is closed and
/// fixed at compile time; values are always bound.
fn upsert_statement(locale: Locale) -> &'static str {
    match locale {
        Locale::En => upsert_sql!("name_en"),
        Locale::Cn => upsert_sql!("name_cn"),
        Locale::Jp => upsert_sql!("name_jp"),
        Locale::Kr => upsert_sql!("name_kr"),
        Locale::Th => upsert_sql!("name_th"),
        Locale::Tw => upsert_sql!("name_tw"),
        Locale::Vi => upsert_sql!("name_vi"),
        Locale::Zh => upsert_sql!("name_zh"),
    }
}

/// Provides the roster upsert plus the reads and writes around it.
pub struct StudentRepo;

impl StudentRepo {
    /// Insert or merge one fragment under `canonical_name` in a single
    /// statement, returning the resulting row.
    pub async fn upsert(
        pool: &DbPool,
        canonical_name: &str,
        fragment: &StudentFragment,
    ) -> Result<Student, sqlx::Error> {
        sqlx::query_as::<_, Student>(upsert_statement(fragment.locale))
            .bind(canonical_name)
            .bind(&fragment.name)
            .bind(&fragment.bullet_type)
            .bind(fragment.source_id)
            .fetch_one(pool)
            .await
    }

    /// List every student, ordered by canonical name.
    pub async fn list(pool: &DbPool) -> Result<Vec<Student>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM students ORDER BY canonical_name ASC");
        sqlx::query_as::<_, Student>(&query).fetch_all(pool).await
    }

    /// All student ids in ascending order.
    pub async fn list_ids(pool: &DbPool) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>("SELECT id FROM students ORDER BY id ASC")
            .fetch_all(pool)
            .await
    }

    /// Upstream id to canonical name pairs for every row that has one.
    ///
    /// Oldest row first: when an upstream rename left two rows sharing a
    /// `source_id`, callers folding this into a map keep the newest.
    pub async fn list_source_ids(pool: &DbPool) -> Result<Vec<(i64, String)>, sqlx::Error> {
        sqlx::query_as::<_, (i64, String)>(
            "SELECT source_id, canonical_name FROM students \
             WHERE source_id IS NOT NULL ORDER BY id ASC",
        )
        .fetch_all(pool)
        .await
    }

    /// Overwrite a student's image path. Returns `true` if a row was updated.
    pub async fn set_image_path(
        pool: &DbPool,
        id: DbId,
        image_path: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE students SET image_path = ? WHERE id = ?")
            .bind(image_path)
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Number of stored students.
    pub async fn count(pool: &DbPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM students")
            .fetch_one(pool)
            .await
    }
}
