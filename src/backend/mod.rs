//! Client side of the Buddy chat backend
//!
//! The backend is an opaque service: it accepts `{"query": ...}` and answers
//! with `{"response": ...}`. Everything behind that contract is out of scope.

mod http;

pub use http::HttpChatBackend;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Request body sent to the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub query: String,
}

/// Successful response body returned by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    pub response: String,
}

/// Error body returned with a non-2xx status
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    #[error("transport failure: {0}")]
    Transport(String),

    #[error("backend returned status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("request cancelled")]
    Cancelled,
}

/// Anything that can answer a chat query
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn chat(&self, query: &str) -> Result<String, BackendError>;
}
