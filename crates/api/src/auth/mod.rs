//! Operator authentication: password verification, server-side sessions
//! and login throttling.

pub mod password;
pub mod rate_limit;
pub mod session;

use std::time::Duration;

/// Default session lifetime in minutes (one day).
const DEFAULT_SESSION_TTL_MINS: i64 = 1440;
/// Default number of login attempts allowed per window.
const DEFAULT_LOGIN_MAX_ATTEMPTS: u32 = 5;
/// Default login throttling window in seconds (15 minutes).
const DEFAULT_LOGIN_WINDOW_SECS: u64 = 15 * 60;

/// Configuration for operator login and sessions.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// The single operator's username.
    pub username: String,
    /// Argon2 PHC hash of the operator's password.
    pub password_hash: String,
    /// Session lifetime.
    pub session_ttl: chrono::Duration,
    /// Login attempts allowed per client per window.
    pub login_max_attempts: u32,
    /// Length of the login throttling window.
    pub login_window: Duration,
    /// Mark the session cookie `Secure` (HTTPS deployments).
    pub secure_cookie: bool,
}

impl AuthConfig {
    /// Load auth configuration from environment variables.
    ///
    /// | Env Var              | Required | Default |
    /// |----------------------|----------|---------|
    /// | `USER_NAME`          | **yes**  | --      |
    /// | `USER_PASSWORD_HASH` | **yes**  | --      |
    /// | `SESSION_TTL_MINS`   | no       | `1440`  |
    /// | `LOGIN_MAX_ATTEMPTS` | no       | `5`     |
    /// | `LOGIN_WINDOW_SECS`  | no       | `900`   |
    /// | `SECURE_COOKIE`      | no       | `false` |
    ///
    /// # Panics
    ///
    /// Panics if a required variable is missing or a number does not parse.
    pub fn from_env() -> Self {
        let username = std::env::var("USER_NAME").expect("USER_NAME must be set in the environment");
        assert!(!username.is_empty(), "USER_NAME must not be empty");

        let password_hash = std::env::var("USER_PASSWORD_HASH")
            .expect("USER_PASSWORD_HASH must be set in the environment");

        let session_ttl_mins: i64 = std::env::var("SESSION_TTL_MINS")
            .unwrap_or_else(|_| DEFAULT_SESSION_TTL_MINS.to_string())
            .parse()
            .expect("SESSION_TTL_MINS must be a valid i64");

        let login_max_attempts: u32 = std::env::var("LOGIN_MAX_ATTEMPTS")
            .unwrap_or_else(|_| DEFAULT_LOGIN_MAX_ATTEMPTS.to_string())
            .parse()
            .expect("LOGIN_MAX_ATTEMPTS must be a valid u32");

        let login_window_secs: u64 = std::env::var("LOGIN_WINDOW_SECS")
            .unwrap_or_else(|_| DEFAULT_LOGIN_WINDOW_SECS.to_string())
            .parse()
            .expect("LOGIN_WINDOW_SECS must be a valid u64");

        let secure_cookie = std::env::var("SECURE_COOKIE")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);

        Self {
            username,
            password_hash,
            session_ttl: chrono::Duration::minutes(session_ttl_mins),
            login_max_attempts,
            login_window: Duration::from_secs(login_window_secs),
            secure_cookie,
        }
    }
}
