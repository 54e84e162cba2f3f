use pearchdeck_core::snippet::API_KEY_PLACEHOLDER;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://api.pearch.ai/v1/search";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub endpoint: String,
    pub api_key: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: API_KEY_PLACEHOLDER.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    /// PEARCH_API_URL, PEARCH_API_KEY, PEARCH_TIMEOUT_SECS
    pub fn from_env() -> Self {
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let d = Self::default();
        let non_empty = |k: &str| get(k).filter(|v| !v.trim().is_empty());
        Self {
            endpoint: non_empty("PEARCH_API_URL").unwrap_or(d.endpoint),
            api_key: non_empty("PEARCH_API_KEY").unwrap_or(d.api_key),
            timeout: non_empty("PEARCH_TIMEOUT_SECS")
                .and_then(|s| s.trim().parse::<u64>().ok())
                .map(Duration::from_secs)
                .unwrap_or(d.timeout),
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key != API_KEY_PLACEHOLDER
    }
}
