//! Transport to the assistant endpoint.
//!
//! One POST per submitted message, body `{"message": ...}`, with the page's
//! CSRF token echoed verbatim in the `X-CSRFToken` header. The endpoint
//! itself (and the token's issuance) belong to the surrounding deployment;
//! this module only speaks its wire shape.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Header the endpoint expects the page token under.
pub const CSRF_HEADER: &str = "X-CSRFToken";

/// Request body for the assistant endpoint.
#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    /// The submitted message, already trimmed.
    pub message: &'a str,
}

/// Response body from the assistant endpoint.
#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    /// Whether the endpoint produced a reply.
    pub success: bool,
    /// Reply text, present iff `success`.
    #[serde(default)]
    pub response: Option<String>,
}

/// Failure kinds for a chat exchange.
///
/// Both kinds are recoverable: the widget renders them as fixed bot replies
/// and the panel stays usable.
#[derive(Debug, Error)]
pub enum ChatError {
    /// The endpoint answered but reported failure, or the payload was not
    /// usable (missing reply text, undecodable body).
    #[error("assistant endpoint reported failure")]
    Api,
    /// The request never completed (connect refused, DNS, timeout).
    #[error("assistant endpoint unreachable: {0}")]
    Transport(#[source] reqwest::Error),
}

/// Something that can answer a chat message.
///
/// The production implementation is [`HttpChatBackend`]; tests substitute
/// counting or scripted fakes.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Send one message and return the reply text.
    async fn send(&self, message: &str, csrf_token: &str) -> Result<String, ChatError>;
}

/// `reqwest`-backed [`ChatBackend`] POSTing to the configured endpoint.
#[derive(Debug, Clone)]
pub struct HttpChatBackend {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpChatBackend {
    /// Create a backend for the given endpoint URL.
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    /// The endpoint this backend posts to.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ChatBackend for HttpChatBackend {
    async fn send(&self, message: &str, csrf_token: &str) -> Result<String, ChatError> {
        let sent = self
            .http
            .post(&self.endpoint)
            .header(CSRF_HEADER, csrf_token)
            .json(&ChatRequest { message })
            .send()
            .await;

        let response = match sent {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(
                    name: "chat.transport.failed",
                    endpoint = %self.endpoint,
                    error = %e,
                    "Chat request never completed"
                );
                return Err(ChatError::Transport(e));
            }
        };

        let status = response.status();

        // A response arrived, so from here on every failure is API-level:
        // non-2xx bodies and undecodable payloads get the same generic reply
        // as an explicit success=false.
        match response.json::<ChatResponse>().await {
            Ok(ChatResponse {
                success: true,
                response: Some(reply),
            }) => Ok(reply),
            Ok(_) => {
                tracing::warn!(
                    name: "chat.api.failed",
                    status = %status,
                    "Assistant endpoint reported failure"
                );
                Err(ChatError::Api)
            }
            Err(e) => {
                tracing::warn!(
                    name: "chat.api.malformed",
                    status = %status,
                    error = %e,
                    "Assistant endpoint returned an unusable payload"
                );
                Err(ChatError::Api)
            }
        }
    }
}
