//! Repository for the `pvp_records` table.

use sqlx::{Executor, Sqlite};

use crate::models::pvp_record::{CreatePvpRecord, PvpRecord};
use crate::DbPool;

const COLUMNS: &str = "id, date, attacker, defender, a1, a2, a3, a4, a_support1, a_support2, \
     result, d1, d2, d3, d4, d_support1, d_support2, comments";

const INSERT: &str = "INSERT INTO pvp_records (
        date, attacker, defender, a1, a2, a3, a4, a_support1, a_support2,
        result, d1, d2, d3, d4, d_support1, d_support2, comments
     ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
     RETURNING id, date, attacker, defender, a1, a2, a3, a4, a_support1, a_support2,
        result, d1, d2, d3, d4, d_support1, d_support2, comments";

/// Provides create, list and bulk import for match records.
pub struct PvpRecordRepo;

impl PvpRecordRepo {
    /// Insert one match record, returning the created row.
    pub async fn create(pool: &DbPool, input: &CreatePvpRecord) -> Result<PvpRecord, sqlx::Error> {
        insert(pool, input).await
    }

    /// List every match record, newest first.
    pub async fn list(pool: &DbPool) -> Result<Vec<PvpRecord>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM pvp_records ORDER BY date DESC, id DESC");
        sqlx::query_as::<_, PvpRecord>(&query).fetch_all(pool).await
    }

    /// Insert all `records` inside one transaction.
    ///
    /// Any failing row rolls back the whole batch. Returns the number of
    /// inserted rows.
    pub async fn import(pool: &DbPool, records: &[CreatePvpRecord]) -> Result<u64, sqlx::Error> {
        let mut tx = pool.begin().await?;
        for record in records {
            insert(&mut *tx, record).await?;
        }
        tx.commit().await?;
        Ok(records.len() as u64)
    }
}

async fn insert<'e, E>(executor: E, input: &CreatePvpRecord) -> Result<PvpRecord, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, PvpRecord>(INSERT)
        .bind(&input.date)
        .bind(&input.attacker)
        .bind(&input.defender)
        .bind(&input.a1)
        .bind(&input.a2)
        .bind(&input.a3)
        .bind(&input.a4)
        .bind(&input.a_support1)
        .bind(&input.a_support2)
        .bind(&input.result)
        .bind(&input.d1)
        .bind(&input.d2)
        .bind(&input.d3)
        .bind(&input.d4)
        .bind(&input.d_support1)
        .bind(&input.d_support2)
        .bind(&input.comments)
        .fetch_one(executor)
        .await
}
