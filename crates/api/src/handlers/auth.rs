//! Handlers for the `/auth` resource (login, logout).

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::Json;
use pvptracker_core::error::CoreError;
use pvptracker_core::types::Timestamp;
use serde::{Deserialize, Serialize};

use crate::auth::password::verify_operator;
use crate::auth::session::{clear_session_cookie, session_cookie};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthSession;
use crate::middleware::client_ip::ClientIp;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Returned by a successful login; the token itself only travels in the cookie.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub username: String,
    pub expires_at: Timestamp,
}

/// POST /api/v1/auth/login
///
/// Verify the operator's credentials and open a cookie session. Attempts are
/// throttled per client address and every attempt lands in the access log.
pub async fn login(
    State(state): State<AppState>,
    ClientIp(client_ip): ClientIp,
    Json(input): Json<LoginRequest>,
) -> AppResult<(HeaderMap, Json<DataResponse<LoginResponse>>)> {
    if let Err(retry_after) = state.login_limiter.check(&client_ip) {
        tracing::warn!(
            target: "access",
            %client_ip,
            username = %input.username,
            outcome = "throttled",
            "Login attempt"
        );
        return Err(AppError::TooManyAttempts {
            retry_after_secs: retry_after.as_secs().max(1),
        });
    }

    let valid = verify_operator(&state.config.auth, &input.username, &input.password)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    let outcome = if valid { "success" } else { "failure" };
    tracing::info!(
        target: "access",
        %client_ip,
        username = %input.username,
        outcome,
        "Login attempt"
    );

    if !valid {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid username or password".into(),
        )));
    }

    let token = state.sessions.create(&input.username).await;
    let session = state.sessions.get(&token).await.ok_or_else(|| {
        AppError::InternalError("Session vanished immediately after creation".into())
    })?;

    let cookie = session_cookie(&token, state.sessions.ttl(), state.config.auth.secure_cookie);
    let mut headers = HeaderMap::new();
    headers.insert(
        SET_COOKIE,
        HeaderValue::from_str(&cookie)
            .map_err(|e| AppError::InternalError(format!("Invalid session cookie: {e}")))?,
    );

    Ok((
        headers,
        Json(DataResponse {
            data: LoginResponse {
                username: session.username,
                expires_at: session.expires_at,
            },
        }),
    ))
}

/// POST /api/v1/auth/logout
///
/// End the current session and clear the cookie.
pub async fn logout(
    State(state): State<AppState>,
    session: AuthSession,
) -> AppResult<(StatusCode, HeaderMap)> {
    state.sessions.destroy(&session.token).await;
    tracing::info!(target: "access", username = %session.username, "Logout");

    let mut headers = HeaderMap::new();
    headers.insert(
        SET_COOKIE,
        HeaderValue::from_str(&clear_session_cookie())
            .map_err(|e| AppError::InternalError(format!("Invalid session cookie: {e}")))?,
    );
    Ok((StatusCode::NO_CONTENT, headers))
}
