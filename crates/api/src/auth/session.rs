//! In-memory server-side sessions keyed by an opaque cookie token.

use std::collections::HashMap;

use chrono::Utc;
use pvptracker_core::types::Timestamp;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE: &str = "pvp_session";

/// An authenticated operator session.
#[derive(Debug, Clone)]
pub struct Session {
    pub username: String,
    pub created_at: Timestamp,
    pub expires_at: Timestamp,
}

/// Process-local session table. Sessions do not survive a restart.
pub struct SessionStore {
    ttl: chrono::Duration,
    sessions: RwLock<HashMap<String, Session>>,
}

impl SessionStore {
    pub fn new(ttl: chrono::Duration) -> Self {
        Self {
            ttl,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Open a session for `username`, returning its token.
    pub async fn create(&self, username: &str) -> String {
        let token = Uuid::new_v4().simple().to_string();
        let now = Utc::now();
        let session = Session {
            username: username.to_string(),
            created_at: now,
            expires_at: now + self.ttl,
        };
        self.sessions.write().await.insert(token.clone(), session);
        token
    }

    /// Look up a live session. Expired sessions are dropped on access.
    pub async fn get(&self, token: &str) -> Option<Session> {
        let session = self.sessions.read().await.get(token).cloned()?;
        if session.expires_at > Utc::now() {
            return Some(session);
        }
        self.sessions.write().await.remove(token);
        None
    }

    /// End a session. Returns `true` if it existed.
    pub async fn destroy(&self, token: &str) -> bool {
        self.sessions.write().await.remove(token).is_some()
    }

    /// Drop every expired session, returning how many were removed.
    pub async fn purge_expired(&self) -> usize {
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| s.expires_at > now);
        before - sessions.len()
    }

    pub fn ttl(&self) -> chrono::Duration {
        self.ttl
    }
}

/// Extract a cookie value from a `Cookie` request header.
pub fn cookie_value<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
        .filter(|value| !value.is_empty())
}

/// `Set-Cookie` value establishing a session.
pub fn session_cookie(token: &str, ttl: chrono::Duration, secure: bool) -> String {
    let mut cookie = format!(
        "{SESSION_COOKIE}={token}; HttpOnly; SameSite=Lax; Path=/; Max-Age={}",
        ttl.num_seconds()
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// `Set-Cookie` value clearing the session cookie.
pub fn clear_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; HttpOnly; SameSite=Lax; Path=/; Max-Age=0")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn created_session_is_retrievable_until_destroyed() {
        let store = SessionStore::new(chrono::Duration::minutes(5));
        let token = store.create("sensei").await;

        let session = store.get(&token).await.expect("session should exist");
        assert_eq!(session.username, "sensei");
        assert!(session.expires_at > session.created_at);

        assert!(store.destroy(&token).await);
        assert!(store.get(&token).await.is_none());
        assert!(!store.destroy(&token).await);
    }

    #[tokio::test]
    async fn expired_sessions_are_rejected_and_purged() {
        let store = SessionStore::new(chrono::Duration::seconds(-1));
        let token = store.create("sensei").await;
        store.create("sensei").await;

        assert!(store.get(&token).await.is_none());
        assert_eq!(store.purge_expired().await, 1);
    }

    #[tokio::test]
    async fn tokens_are_unique() {
        let store = SessionStore::new(chrono::Duration::minutes(5));
        let a = store.create("sensei").await;
        let b = store.create("sensei").await;
        assert_ne!(a, b);
        assert_eq!(a.len(), 32);
    }

    #[test]
    fn cookie_value_finds_named_pair() {
        let header = "theme=dark; pvp_session=abc123; lang=jp";
        assert_eq!(cookie_value(header, SESSION_COOKIE), Some("abc123"));
        assert_eq!(cookie_value(header, "missing"), None);
        assert_eq!(cookie_value("pvp_session=", SESSION_COOKIE), None);
    }

    #[test]
    fn session_cookie_attributes() {
        let cookie = session_cookie("tok", chrono::Duration::minutes(2), true);
        assert!(cookie.starts_with("pvp_session=tok;"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Max-Age=120"));
        assert!(cookie.ends_with("; Secure"));
        assert!(clear_session_cookie().contains("Max-Age=0"));
    }
}
