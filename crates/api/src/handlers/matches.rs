//! Handlers for the `/matches` resource (PvP match history).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use pvptracker_core::pvp::{validate_match_date, validate_match_field};
use pvptracker_db::models::pvp_record::{CreatePvpRecord, PvpRecord};
use pvptracker_db::repositories::PvpRecordRepo;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthSession;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ImportResponse {
    pub imported: u64,
}

fn validate_record(record: &CreatePvpRecord) -> Result<(), AppError> {
    validate_match_date(&record.date)?;
    validate_match_field("attacker", &record.attacker)?;
    validate_match_field("defender", &record.defender)?;
    validate_match_field("result", &record.result)?;
    Ok(())
}

/// GET /api/v1/matches
pub async fn list_matches(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<PvpRecord>>>> {
    let records = PvpRecordRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: records }))
}

/// POST /api/v1/matches
pub async fn create_match(
    State(state): State<AppState>,
    session: AuthSession,
    Json(input): Json<CreatePvpRecord>,
) -> AppResult<(StatusCode, Json<DataResponse<PvpRecord>>)> {
    validate_record(&input)?;

    let record = PvpRecordRepo::create(&state.pool, &input).await?;
    tracing::info!(match_id = record.id, user = %session.username, "Match record created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: record })))
}

/// POST /api/v1/matches/import
///
/// Load the configured match export and insert it in one transaction.
/// A single invalid record rejects the whole file.
pub async fn import_matches(
    State(state): State<AppState>,
    session: AuthSession,
) -> AppResult<Json<DataResponse<ImportResponse>>> {
    let path = &state.config.pvp_records_path;

    let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
        AppError::BadRequest(format!("Cannot read match export {}: {e}", path.display()))
    })?;

    let records: Vec<CreatePvpRecord> = serde_json::from_str(&raw).map_err(|e| {
        AppError::BadRequest(format!("Malformed match export {}: {e}", path.display()))
    })?;

    for (index, record) in records.iter().enumerate() {
        validate_record(record).map_err(|e| match e {
            AppError::Core(core) => AppError::BadRequest(format!("Record {index}: {core}")),
            other => other,
        })?;
    }

    let imported = PvpRecordRepo::import(&state.pool, &records).await?;
    tracing::info!(
        imported,
        path = %path.display(),
        user = %session.username,
        "Match export imported"
    );

    Ok(Json(DataResponse {
        data: ImportResponse { imported },
    }))
}
