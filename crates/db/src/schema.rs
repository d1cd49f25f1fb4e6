//! Runtime schema management.
//!
//! Tables are created with `CREATE TABLE IF NOT EXISTS` and later columns
//! are evolved in with [`ensure_column`], so [`ensure_schema`] can run on
//! every process start against a fresh, current or older database.

use std::sync::LazyLock;

use regex::Regex;

use crate::DbPool;

pub const STUDENTS_TABLE: &str = "students";
pub const PVP_RECORDS_TABLE: &str = "pvp_records";

const CREATE_STUDENTS: &str = "
    CREATE TABLE IF NOT EXISTS students (
        id INTEGER PRIMARY KEY,
        canonical_name TEXT NOT NULL,
        name_en TEXT,
        name_cn TEXT,
        name_jp TEXT,
        name_kr TEXT,
        name_th TEXT,
        name_tw TEXT,
        name_vi TEXT,
        name_zh TEXT,
        bullet_type TEXT NOT NULL,
        CONSTRAINT uq_students_canonical_name UNIQUE (canonical_name)
    )";

const CREATE_PVP_RECORDS: &str = "
    CREATE TABLE IF NOT EXISTS pvp_records (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        date TEXT NOT NULL,
        attacker TEXT NOT NULL,
        defender TEXT NOT NULL,
        a1 TEXT,
        a2 TEXT,
        a3 TEXT,
        a4 TEXT,
        a_support1 TEXT,
        a_support2 TEXT,
        result TEXT NOT NULL,
        d1 TEXT,
        d2 TEXT,
        d3 TEXT,
        d4 TEXT,
        d_support1 TEXT,
        d_support2 TEXT,
        comments TEXT
    )";

/// Columns added to `students` after its first release, in order.
const STUDENT_COLUMNS: &[(&str, &str)] = &[("image_path", "TEXT"), ("source_id", "INTEGER")];

static IDENTIFIER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid regex"));

static COLUMN_TYPE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z]+(?: [A-Za-z]+)*$").expect("valid regex"));

/// Result of an [`ensure_column`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnOutcome {
    Added,
    AlreadyExists,
    /// The column could not be added; the message has been logged.
    Failed(String),
}

/// Create every table the application needs and evolve `students` to the
/// current column set.
///
/// Table creation failures are returned; column evolution failures are
/// logged and tolerated.
pub async fn ensure_schema(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query(CREATE_STUDENTS).execute(pool).await?;
    sqlx::query(CREATE_PVP_RECORDS).execute(pool).await?;

    for (column, column_type) in STUDENT_COLUMNS {
        ensure_column(pool, STUDENTS_TABLE, column, column_type).await;
    }

    tracing::info!("Schema ensured");
    Ok(())
}

/// Add `column` to `table` unless it is already there.
///
/// "duplicate column name" counts as success. Any other failure is logged
/// and reported as [`ColumnOutcome::Failed`] without aborting the caller.
pub async fn ensure_column(
    pool: &DbPool,
    table: &str,
    column: &str,
    column_type: &str,
) -> ColumnOutcome {
    if !IDENTIFIER_RE.is_match(table) || !IDENTIFIER_RE.is_match(column) {
        let msg = format!("Invalid identifier '{table}.{column}'");
        tracing::error!(table, column, "{msg}");
        return ColumnOutcome::Failed(msg);
    }
    if !COLUMN_TYPE_RE.is_match(column_type) {
        let msg = format!("Invalid column type '{column_type}'");
        tracing::error!(table, column, "{msg}");
        return ColumnOutcome::Failed(msg);
    }

    // Identifiers were validated above; DDL cannot take bind parameters.
    let ddl = format!("ALTER TABLE {table} ADD COLUMN {column} {column_type}");
    match sqlx::query(&ddl).execute(pool).await {
        Ok(_) => {
            tracing::info!(table, column, "Column added");
            ColumnOutcome::Added
        }
        Err(err) if is_duplicate_column(&err) => {
            tracing::debug!(table, column, "Column already exists");
            ColumnOutcome::AlreadyExists
        }
        Err(err) => {
            tracing::error!(table, column, error = %err, "Failed to add column");
            ColumnOutcome::Failed(err.to_string())
        }
    }
}

/// Names of the columns currently present on `table`, in declaration order.
pub async fn table_columns(pool: &DbPool, table: &str) -> Result<Vec<String>, sqlx::Error> {
    sqlx::query_scalar::<_, String>("SELECT name FROM pragma_table_info(?) ORDER BY cid")
        .bind(table)
        .fetch_all(pool)
        .await
}

fn is_duplicate_column(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(|db_err| db_err.message().contains("duplicate column name"))
}
