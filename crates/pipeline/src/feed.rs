//! Locale feed retrieval.
//!
//! A feed is a JSON array of character objects. The array elements are
//! handed back undecoded so one malformed element costs only that element.

use std::time::Duration;

use async_trait::async_trait;

/// Errors from fetching a single feed. Each one skips that feed only.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The remote returned a non-2xx status code.
    #[error("Feed returned status {status}")]
    Status { status: u16 },

    /// The body was not a JSON array.
    #[error("Malformed feed: {0}")]
    Malformed(String),
}

/// Something that can produce the raw elements of a feed address.
#[async_trait]
pub trait FeedSource: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Vec<serde_json::Value>, FeedError>;
}

/// [`FeedSource`] over HTTP(S) using [`reqwest`].
pub struct HttpFeedSource {
    client: reqwest::Client,
}

impl HttpFeedSource {
    /// Build a source whose requests time out after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, FeedError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl FeedSource for HttpFeedSource {
    async fn fetch(&self, url: &str) -> Result<Vec<serde_json::Value>, FeedError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        parse_feed(&body)
    }
}

/// Parse a feed body into its array elements.
pub fn parse_feed(body: &str) -> Result<Vec<serde_json::Value>, FeedError> {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(serde_json::Value::Array(items)) => Ok(items),
        Ok(other) => Err(FeedError::Malformed(format!(
            "expected a JSON array, got {}",
            json_kind(&other)
        ))),
        Err(e) => Err(FeedError::Malformed(e.to_string())),
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
