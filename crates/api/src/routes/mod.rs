pub mod auth;
pub mod health;
pub mod matches;
pub mod students;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /auth/login                 login (public, throttled)
/// /auth/logout                logout (requires session)
///
/// /students                   list for ?language= (requires session)
/// /students/sync              re-run roster import (requires session)
///
/// /matches                    list (public), create (requires session)
/// /matches/import             import the configured export (requires session)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/students", students::router())
        .nest("/matches", matches::router())
}
