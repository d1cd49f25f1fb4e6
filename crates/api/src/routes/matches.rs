use axum::routing::{get, post};
use axum::Router;

use crate::handlers::matches;
use crate::state::AppState;

/// Routes mounted at `/matches`.
///
/// ```text
/// GET  /         -> list_matches (public)
/// POST /         -> create_match (requires session)
/// POST /import   -> import_matches (requires session)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(matches::list_matches).post(matches::create_match))
        .route("/import", post(matches::import_matches))
}
