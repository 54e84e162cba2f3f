use crate::config::ClientConfig;
use pearchdeck_core::{DeckError, Result, SearchRequest};
use reqwest::Client;
use serde_json::Value as JsonValue;
use tokio_util::sync::CancellationToken;

/// One POST to the search endpoint. Implementations return as soon as
/// `cancel` fires, with `DeckError::Cancelled`.
#[async_trait::async_trait]
pub trait SearchTransport: Send + Sync + 'static {
    async fn search(&self, request: &SearchRequest, cancel: &CancellationToken)
        -> Result<JsonValue>;
}

pub struct HttpTransport {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| DeckError::Transport(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait::async_trait]
impl SearchTransport for HttpTransport {
    async fn search(
        &self,
        request: &SearchRequest,
        cancel: &CancellationToken,
    ) -> Result<JsonValue> {
        let send = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(request)
            .send();
        let response = tokio::select! {
            _ = cancel.cancelled() => return Err(DeckError::Cancelled),
            r = send => r.map_err(|e| DeckError::Transport(e.to_string()))?,
        };

        let status = response.status();
        if !status.is_success() {
            return Err(DeckError::Http {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("").to_string(),
            });
        }

        let body = tokio::select! {
            _ = cancel.cancelled() => return Err(DeckError::Cancelled),
            b = response.bytes() => b.map_err(|e| DeckError::Transport(e.to_string()))?,
        };
        serde_json::from_slice(&body).map_err(|e| DeckError::Decode(e.to_string()))
    }
}
