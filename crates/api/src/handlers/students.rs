//! Handlers for the `/students` resource.

use axum::extract::{Query, State};
use axum::Json;
use pvptracker_core::error::CoreError;
use pvptracker_core::locale::Locale;
use pvptracker_core::naming::student_image_url;
use pvptracker_db::models::student::Student;
use pvptracker_pipeline::backfill::BackfillSummary;
use pvptracker_pipeline::import::ImportSummary;
use pvptracker_pipeline::sync_roster;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::middleware::auth::AuthSession;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct StudentListQuery {
    /// Locale code (`en`, `jp`, ...). Defaults to the base locale.
    pub language: Option<String>,
}

/// One student as seen from a locale.
#[derive(Debug, Serialize)]
pub struct StudentView {
    #[serde(flatten)]
    pub student: Student,
    /// The locale's translation, or the canonical name when missing.
    pub display_name: String,
    pub image_url: String,
}

impl StudentView {
    pub fn new(student: Student, locale: Locale) -> Self {
        let display_name = student.display_name(locale).to_string();
        let image_url = student_image_url(student.id, student.image_path.as_deref());
        Self {
            student,
            display_name,
            image_url,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SyncResponse {
    pub import: ImportSummary,
    pub backfill: BackfillSummary,
}

/// GET /api/v1/students?language=<locale>
pub async fn list_students(
    State(state): State<AppState>,
    _session: AuthSession,
    Query(params): Query<StudentListQuery>,
) -> AppResult<Json<DataResponse<Vec<StudentView>>>> {
    let locale = match params.language.as_deref() {
        Some(code) => code.parse::<Locale>()?,
        None => Locale::BASE,
    };

    let students = state.store.list_students().await?;
    let views = students
        .into_iter()
        .map(|s| StudentView::new(s, locale))
        .collect();

    Ok(Json(DataResponse { data: views }))
}

/// POST /api/v1/students/sync
///
/// Re-run the roster import and image backfill without restarting.
/// Refused with 409 while another sync holds the lock.
pub async fn sync_students(
    State(state): State<AppState>,
    session: AuthSession,
) -> AppResult<Json<DataResponse<SyncResponse>>> {
    let _running = state.sync_lock.try_lock().map_err(|_| {
        CoreError::Conflict("A roster sync is already running".into())
    })?;
    tracing::info!(user = %session.username, "Manual roster sync requested");

    let (import, backfill) = sync_roster(
        state.store.as_ref(),
        state.feeds.as_ref(),
        &state.ingest.feed_urls,
    )
    .await;

    Ok(Json(DataResponse {
        data: SyncResponse { import, backfill },
    }))
}
