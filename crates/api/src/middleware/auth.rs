//! Session-cookie authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::header::COOKIE;
use axum::http::request::Parts;
use pvptracker_core::error::CoreError;

use crate::auth::session::{cookie_value, SESSION_COOKIE};
use crate::error::AppError;
use crate::state::AppState;

/// The operator behind the request's `pvp_session` cookie.
///
/// Add it as a handler parameter to make a route require login:
///
/// ```ignore
/// async fn my_handler(session: AuthSession) -> AppResult<Json<()>> {
///     tracing::info!(user = %session.username, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub username: String,
    /// Opaque token, needed to end the session on logout.
    pub token: String,
}

impl FromRequestParts<AppState> for AuthSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find_map(|header| cookie_value(header, SESSION_COOKIE))
            .ok_or_else(|| AppError::Core(CoreError::Unauthorized("Login required".into())))?
            .to_string();

        let session = state.sessions.get(&token).await.ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Session expired or invalid".into()))
        })?;

        Ok(AuthSession {
            username: session.username,
            token,
        })
    }
}
