//! Fixed-window login throttling per client key.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

#[derive(Debug)]
struct Window {
    started: Instant,
    attempts: u32,
}

/// Counts login attempts per client and refuses them once `max_attempts`
/// is reached within `window`. Every attempt counts, successful or not.
pub struct LoginRateLimiter {
    max_attempts: u32,
    window: Duration,
    windows: Mutex<HashMap<String, Window>>,
}

impl LoginRateLimiter {
    pub fn new(max_attempts: u32, window: Duration) -> Self {
        Self {
            max_attempts,
            window,
            windows: Mutex::new(HashMap::new()),
        }
    }

    /// Register an attempt from `client`.
    ///
    /// Returns `Err(retry_after)` when the client is over its budget.
    pub fn check(&self, client: &str) -> Result<(), Duration> {
        self.check_at(client, Instant::now())
    }

    fn check_at(&self, client: &str, now: Instant) -> Result<(), Duration> {
        let mut windows = self
            .windows
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        // Drop expired windows.
        windows.retain(|_, w| now.saturating_duration_since(w.started) < self.window);

        let window = windows.entry(client.to_string()).or_insert(Window {
            started: now,
            attempts: 0,
        });

        let elapsed = now.saturating_duration_since(window.started);
        if window.attempts >= self.max_attempts {
            return Err(self.window.saturating_sub(elapsed));
        }
        window.attempts += 1;
        Ok(())
    }
}
