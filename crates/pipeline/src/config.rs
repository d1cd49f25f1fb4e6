use std::time::Duration;

/// Upstream feeds, one per supported locale, base locale first.
pub const DEFAULT_FEED_URLS: [&str; 8] = [
    "https://schale.gg/data/en/students.json",
    "https://schale.gg/data/cn/students.json",
    "https://schale.gg/data/jp/students.json",
    "https://schale.gg/data/kr/students.json",
    "https://schale.gg/data/th/students.json",
    "https://schale.gg/data/tw/students.json",
    "https://schale.gg/data/vi/students.json",
    "https://schale.gg/data/zh/students.json",
];

/// Default per-feed request timeout in seconds.
const DEFAULT_FEED_TIMEOUT_SECS: u64 = 30;

/// Roster ingestion configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct IngestConfig {
    /// Feed addresses in the order they are listed.
    pub feed_urls: Vec<String>,
    /// Timeout applied to each feed request.
    pub feed_timeout: Duration,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            feed_urls: DEFAULT_FEED_URLS.iter().map(|s| s.to_string()).collect(),
            feed_timeout: Duration::from_secs(DEFAULT_FEED_TIMEOUT_SECS),
        }
    }
}

impl IngestConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var             | Default                     |
    /// |---------------------|-----------------------------|
    /// | `STUDENT_FEED_URLS` | the eight schale.gg feeds   |
    /// | `FEED_TIMEOUT_SECS` | `30`                        |
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let feed_urls = std::env::var("STUDENT_FEED_URLS")
            .ok()
            .map(|raw| parse_url_list(&raw))
            .filter(|urls| !urls.is_empty())
            .unwrap_or(defaults.feed_urls);

        let feed_timeout_secs: u64 = std::env::var("FEED_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_FEED_TIMEOUT_SECS.to_string())
            .parse()
            .expect("FEED_TIMEOUT_SECS must be a valid u64");

        Self {
            feed_urls,
            feed_timeout: Duration::from_secs(feed_timeout_secs),
        }
    }
}

fn parse_url_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
