//! Chat widget controller and widget storage.
//!
//! Each page render mints one widget: a controller object owning the panel
//! state explicitly (no ambient globals). Widgets live in a [`WidgetStore`]
//! and are reaped after a period of inactivity, which is how "torn down on
//! navigation" is rendered server-side.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::client::{ChatBackend, ChatError};
use super::{API_FAILURE_REPLY, CONNECT_FAILURE_REPLY, Message};

/// Widgets idle longer than this are reaped (abandoned page loads).
const DEFAULT_WIDGET_TIMEOUT: Duration = Duration::from_secs(30 * 60);

/// Why a submission was not started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitRejected {
    /// Empty or whitespace-only input; silently ignored.
    Empty,
    /// A previous exchange has not settled yet. The send control is also
    /// disabled client-side for the duration; this is the server-side guard.
    Busy,
}

/// Controller for one chat widget instance.
///
/// Owns the panel's open/closed flag, the transcript, the typing indicator,
/// and the single-flight guard. Cheap to clone (shared interior).
#[derive(Debug, Clone)]
pub struct ChatWidget {
    inner: Arc<WidgetInner>,
}

#[derive(Debug)]
struct WidgetInner {
    id: String,
    state: RwLock<WidgetState>,
    last_activity: RwLock<DateTime<Utc>>,
}

#[derive(Debug, Default)]
struct WidgetState {
    open: bool,
    messages: Vec<Message>,
    typing: bool,
    in_flight: bool,
}

impl ChatWidget {
    fn new(id: String) -> Self {
        Self {
            inner: Arc::new(WidgetInner {
                id,
                state: RwLock::new(WidgetState::default()),
                last_activity: RwLock::new(Utc::now()),
            }),
        }
    }

    /// The widget's identifier, as embedded in the page.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.inner.id
    }

    /// Reveal the panel. Opening an open panel is a no-op.
    pub fn open(&self) {
        self.inner.state.write().unwrap().open = true;
        self.touch();
    }

    /// Hide the panel. The transcript survives; closing does not cancel an
    /// in-flight exchange.
    pub fn close(&self) {
        self.inner.state.write().unwrap().open = false;
        self.touch();
    }

    /// Whether the panel is currently shown.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.inner.state.read().unwrap().open
    }

    /// Whether the typing indicator is currently present.
    #[must_use]
    pub fn is_typing(&self) -> bool {
        self.inner.state.read().unwrap().typing
    }

    /// Snapshot of the transcript, in append order.
    #[must_use]
    pub fn transcript(&self) -> Vec<Message> {
        self.inner.state.read().unwrap().messages.clone()
    }

    /// Number of transcript entries.
    #[must_use]
    pub fn message_count(&self) -> usize {
        self.inner.state.read().unwrap().messages.len()
    }

    /// Start an exchange: append the user message and raise the typing
    /// indicator, in that order.
    ///
    /// Rejects whitespace-only input and overlapping submissions; neither
    /// mutates the transcript.
    pub fn begin_submit(&self, text: &str) -> Result<(), SubmitRejected> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(SubmitRejected::Empty);
        }

        let mut state = self.inner.state.write().unwrap();
        if state.in_flight {
            return Err(SubmitRejected::Busy);
        }

        // Stale indicators cannot exist here (complete always clears), but
        // the ordering contract is: any prior indicator goes before the new
        // exchange begins.
        state.typing = false;
        state.messages.push(Message::user(trimmed));
        state.typing = true;
        state.in_flight = true;
        drop(state);
        self.touch();
        Ok(())
    }

    /// Settle an exchange: drop the typing indicator, then append exactly
    /// one bot message derived from the outcome.
    ///
    /// The indicator is removed before the bot append for every outcome.
    pub fn complete(&self, outcome: Result<String, ChatError>) -> Message {
        let reply = match outcome {
            Ok(text) => Message::bot(text),
            Err(ChatError::Transport(_)) => Message::bot(CONNECT_FAILURE_REPLY),
            Err(ChatError::Api) => Message::bot(API_FAILURE_REPLY),
        };

        let mut state = self.inner.state.write().unwrap();
        state.typing = false;
        state.in_flight = false;
        state.messages.push(reply.clone());
        drop(state);
        self.touch();
        reply
    }

    fn touch(&self) {
        *self.inner.last_activity.write().unwrap() = Utc::now();
    }

    fn is_expired(&self, timeout: Duration) -> bool {
        let last = *self.inner.last_activity.read().unwrap();
        (Utc::now() - last).to_std().is_ok_and(|idle| idle > timeout)
    }
}

/// Run one full exchange against a backend.
///
/// Returns `None` without touching the backend when the submission is
/// rejected (empty input or busy widget); otherwise returns the appended
/// bot reply.
pub async fn run_exchange(
    widget: &ChatWidget,
    backend: &dyn ChatBackend,
    text: &str,
    csrf_token: &str,
) -> Option<Message> {
    if let Err(rejected) = widget.begin_submit(text) {
        tracing::debug!(
            name: "chat.submit.rejected",
            widget = %widget.id(),
            reason = ?rejected,
            "Chat submission rejected"
        );
        return None;
    }

    let outcome = backend.send(text.trim(), csrf_token).await;
    Some(widget.complete(outcome))
}

/// Thread-safe store of live widgets.
#[derive(Debug, Clone)]
pub struct WidgetStore {
    inner: Arc<RwLock<HashMap<String, ChatWidget>>>,
}

impl Default for WidgetStore {
    fn default() -> Self {
        Self::new()
    }
}

impl WidgetStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Mint a widget for a fresh page render.
    #[must_use]
    pub fn create(&self) -> ChatWidget {
        let id = Uuid::new_v4().to_string();
        let widget = ChatWidget::new(id.clone());
        self.inner.write().unwrap().insert(id, widget.clone());
        widget
    }

    /// Look up a widget by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<ChatWidget> {
        self.inner.read().unwrap().get(id).cloned()
    }

    /// Look up a widget, minting one under the given id if the page's
    /// widget has already been reaped.
    #[must_use]
    pub fn get_or_create(&self, id: &str) -> ChatWidget {
        if let Some(widget) = self.get(id) {
            return widget;
        }
        let widget = ChatWidget::new(id.to_string());
        self.inner
            .write()
            .unwrap()
            .insert(id.to_string(), widget.clone());
        widget
    }

    /// Number of live widgets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read().unwrap().len()
    }

    /// Whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reap widgets idle longer than the default timeout. Returns how many
    /// were removed.
    pub fn cleanup_expired(&self) -> usize {
        self.cleanup_expired_with_timeout(DEFAULT_WIDGET_TIMEOUT)
    }

    /// Reap widgets idle longer than `timeout`.
    pub fn cleanup_expired_with_timeout(&self, timeout: Duration) -> usize {
        let mut guard = self.inner.write().unwrap();
        let before = guard.len();
        guard.retain(|_, widget| !widget.is_expired(timeout));
        before - guard.len()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::chat::MessageRole;

    /// Backend that counts calls and returns a scripted outcome.
    struct ScriptedBackend {
        calls: AtomicUsize,
        outcome: fn() -> Result<String, ChatError>,
    }

    impl ScriptedBackend {
        fn new(outcome: fn() -> Result<String, ChatError>) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                outcome,
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ChatBackend for ScriptedBackend {
        async fn send(&self, _message: &str, _csrf: &str) -> Result<String, ChatError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            (self.outcome)()
        }
    }

    fn widget() -> ChatWidget {
        WidgetStore::new().create()
    }

    #[test]
    fn test_open_close_idempotent() {
        let w = widget();
        assert!(!w.is_open());
        w.open();
        w.open();
        assert!(w.is_open());
        w.close();
        w.close();
        assert!(!w.is_open());
    }

    #[test]
    fn test_transcript_survives_close() {
        let w = widget();
        w.open();
        w.begin_submit("Hi").unwrap();
        w.complete(Ok("Hello!".to_string()));
        w.close();
        assert_eq!(w.message_count(), 2);
    }

    #[tokio::test]
    async fn test_empty_submit_is_noop_and_sends_nothing() {
        let w = widget();
        let backend = ScriptedBackend::new(|| Ok("unused".to_string()));

        assert!(run_exchange(&w, &backend, "", "tok").await.is_none());
        assert!(run_exchange(&w, &backend, "   \n\t ", "tok").await.is_none());

        assert_eq!(backend.calls(), 0);
        assert_eq!(w.message_count(), 0);
        assert!(!w.is_typing());
    }

    #[tokio::test]
    async fn test_successful_exchange_ordering() {
        let w = widget();
        let backend = ScriptedBackend::new(|| Ok("Hello!".to_string()));

        let reply = run_exchange(&w, &backend, "Hi", "tok").await.unwrap();
        assert_eq!(reply.content, "Hello!");

        let transcript = w.transcript();
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript[0].role, MessageRole::User);
        assert_eq!(transcript[0].content, "Hi");
        assert_eq!(transcript[1].role, MessageRole::Bot);
        assert_eq!(transcript[1].content, "Hello!");
        assert!(!w.is_typing());
        assert_eq!(backend.calls(), 1);
    }

    #[tokio::test]
    async fn test_api_failure_yields_fixed_reply() {
        let w = widget();
        let backend = ScriptedBackend::new(|| Err(ChatError::Api));

        let reply = run_exchange(&w, &backend, "Hi", "tok").await.unwrap();
        assert_eq!(reply.content, API_FAILURE_REPLY);
        assert!(!w.is_typing());
        assert_eq!(w.message_count(), 2);
    }

    #[test]
    fn test_typing_indicator_lifecycle() {
        let w = widget();
        w.begin_submit("Hi").unwrap();
        assert!(w.is_typing());
        w.complete(Err(ChatError::Api));
        assert!(!w.is_typing());

        // A second exchange never sees a stale indicator.
        w.begin_submit("again").unwrap();
        assert!(w.is_typing());
        w.complete(Ok("ok".to_string()));
        assert!(!w.is_typing());
    }

    #[test]
    fn test_overlapping_submit_rejected() {
        let w = widget();
        w.begin_submit("first").unwrap();
        assert_eq!(w.begin_submit("second"), Err(SubmitRejected::Busy));
        // Only the first user message landed.
        assert_eq!(w.message_count(), 1);

        w.complete(Ok("done".to_string()));
        assert!(w.begin_submit("third").is_ok());
    }

    #[test]
    fn test_submitted_text_is_trimmed() {
        let w = widget();
        w.begin_submit("  Hi  ").unwrap();
        assert_eq!(w.transcript()[0].content, "Hi");
    }

    #[test]
    fn test_store_expiry() {
        let store = WidgetStore::new();
        let w = store.create();
        assert_eq!(store.len(), 1);
        assert!(store.get(w.id()).is_some());

        // Nothing is idle longer than an hour yet.
        assert_eq!(store.cleanup_expired_with_timeout(Duration::from_secs(3600)), 0);
        // Everything is idle longer than zero.
        assert_eq!(store.cleanup_expired_with_timeout(Duration::ZERO), 1);
        assert!(store.is_empty());

        // A reaped widget id resolves to a fresh, empty widget.
        let revived = store.get_or_create(w.id());
        assert_eq!(revived.message_count(), 0);
    }
}
