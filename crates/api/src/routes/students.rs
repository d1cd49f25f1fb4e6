use axum::routing::{get, post};
use axum::Router;

use crate::handlers::students;
use crate::state::AppState;

/// Routes mounted at `/students`. All of them require a session.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(students::list_students))
        .route("/sync", post(students::sync_students))
}
