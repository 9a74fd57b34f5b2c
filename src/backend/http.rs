use super::{BackendError, ChatBackend, ChatReply, ChatRequest, ErrorBody};
use crate::config::BackendConfig;
use crate::{BuddyError, Result};
use async_trait::async_trait;
use reqwest::Url;
use tracing::{debug, warn};

/// Backend reached over HTTP with a JSON POST
#[derive(Debug, Clone)]
pub struct HttpChatBackend {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpChatBackend {
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let endpoint = Url::parse(&config.endpoint).map_err(|e| {
            BuddyError::ConfigError(format!("Invalid backend endpoint {}: {}", config.endpoint, e))
        })?;

        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| BuddyError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl ChatBackend for HttpChatBackend {
    async fn chat(&self, query: &str) -> std::result::Result<String, BackendError> {
        debug!("POST {} ({} chars)", self.endpoint, query.len());

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&ChatRequest {
                query: query.to_string(),
            })
            .send()
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&body)
                .map(|b| b.error)
                .unwrap_or(body);
            warn!("Backend answered {}: {}", status, message);
            return Err(BackendError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let reply: ChatReply = serde_json::from_str(&body)
            .map_err(|e| BackendError::InvalidResponse(e.to_string()))?;

        debug!("Backend replied with {} chars", reply.response.len());
        Ok(reply.response)
    }
}
