use reqwest::Client;
use shared::agent_api::{ChatMessage, CompletionRequest, CompletionResponse};
use std::time::Duration;
use thiserror::Error;

use crate::shared_http;

#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),
    /// Non-success HTTP status; the body is kept verbatim
    #[error("{status}: {body}")]
    Status { status: u16, body: String },
    #[error("unexpected response: {0}")]
    Decode(String),
}

/// Anything that can turn a conversation into the next assistant reply.
#[async_trait::async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, CompletionError>;
}

/// Completion service reached with a single JSON POST.
pub struct HttpCompletionClient {
    http: Client,
    endpoint: String,
    timeout: Duration,
}

impl HttpCompletionClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self {
            http: shared_http(),
            endpoint: endpoint.into(),
            timeout,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait::async_trait]
impl CompletionClient for HttpCompletionClient {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, CompletionError> {
        let req = CompletionRequest { messages };
        tracing::debug!(endpoint = %self.endpoint, turns = messages.len(), "sending completion request");

        let resp = self
            .http
            .post(&self.endpoint)
            .timeout(self.timeout)
            .json(&req)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(CompletionError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let text = resp.text().await?;
        let body: CompletionResponse =
            serde_json::from_str(&text).map_err(|e| CompletionError::Decode(e.to_string()))?;
        Ok(body.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_keeps_body_verbatim() {
        let err = CompletionError::Status {
            status: 429,
            body: "{\"error\":\"slow down\"}".to_string(),
        };
        assert_eq!(err.to_string(), "429: {\"error\":\"slow down\"}");
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_transport_error() {
        let client = HttpCompletionClient::new("http://127.0.0.1:1/api/chat", Duration::from_secs(2));
        let err = client
            .complete(&[ChatMessage::user("hi")])
            .await
            .unwrap_err();
        assert!(matches!(err, CompletionError::Transport(_)));
    }
}
