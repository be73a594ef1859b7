//! Transport to the chat endpoint.

use async_trait::async_trait;
use sensei_core::{ChatRequest, ChatResponse};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Request never completed (DNS, refused, reset, timeout).
    #[error("connection error: {0}")]
    Connection(String),

    /// A response arrived but is not a chat response.
    #[error("unexpected server response: {0}")]
    UnexpectedResponse(String),

    /// Local state could not be read or written.
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &ChatRequest) -> Result<ChatResponse, ClientError>;
}

/// JSON-over-HTTP transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: &ChatRequest) -> Result<ChatResponse, ClientError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| ClientError::Connection(e.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| ClientError::Connection(e.to_string()))?;

        // Error bodies are not chat responses; decoding fails and reports them.
        serde_json::from_slice::<ChatResponse>(&body).map_err(|e| {
            ClientError::UnexpectedResponse(format!("HTTP {}: {}", status, e))
        })
    }
}
