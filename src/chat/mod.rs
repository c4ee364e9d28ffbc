//! Chat widget domain: transcript model, widget controller, and the
//! transport that talks to the assistant endpoint.
//!
//! The widget is a small state machine ([`widget::ChatWidget`]) owning the
//! panel's visibility, its transcript, and the typing indicator. The
//! transport ([`client::HttpChatBackend`]) performs exactly one POST per
//! submitted message; failures are folded back into the transcript as
//! bot-styled replies rather than surfaced as errors.

pub mod client;
pub mod widget;

pub use client::{ChatBackend, ChatError, HttpChatBackend};
pub use widget::{ChatWidget, WidgetStore};

use serde::{Deserialize, Serialize};

/// Reply shown when the endpoint answers but reports failure (or returns a
/// payload we cannot use).
pub const API_FAILURE_REPLY: &str = "Sorry, I encountered an error. Please try again.";

/// Reply shown when the request never completes.
pub const CONNECT_FAILURE_REPLY: &str =
    "Sorry, I'm having trouble connecting. Please try again later.";

/// Author of a transcript message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// Message typed by the operator.
    User,
    /// Reply from the assistant (including the fixed failure replies).
    Bot,
}

/// A single transcript entry.
///
/// Entries are immutable once appended and live only as long as the widget
/// that holds them; nothing is written to disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Author of the message.
    pub role: MessageRole,
    /// Raw message text. Escaping happens at render time, never here.
    pub content: String,
}

impl Message {
    /// Create a user message.
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    /// Create a bot message.
    #[must_use]
    pub fn bot(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Bot,
            content: content.into(),
        }
    }
}
