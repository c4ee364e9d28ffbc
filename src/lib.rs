//! Metro Induction Web UI
//!
//! Server-rendered UI layer for a metro train-induction system: the
//! induction ranklist, fleet data upload with client-equivalent
//! validation, and an assistant chat widget that relays messages to a
//! remote endpoint.
//!
//! # Architecture
//!
//! - **Server**: Axum HTTP server rendering pages and HTMX fragments
//! - **Chat**: per-page widget controllers plus a `reqwest` transport to
//!   the assistant endpoint
//! - **Validation**: pure upload/form validators surfaced as re-rendered
//!   fragments and alert banners
//! - **UI**: raw HTML assembled server-side, HTMX + Alpine.js attributes
//!   for interactivity
//!
//! # Modules
//!
//! - [`chat`]: widget state machine and assistant transport
//! - [`validate`]: upload and form validation rules
//! - [`ui`]: page shell, page content, fragment markup
//! - [`fleet`]: demo induction fleet catalogue

// Allow pedantic clippy warnings that don't add value for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::missing_fields_in_debug)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::cargo_common_metadata)]
#![allow(clippy::multiple_crate_versions)]
#![allow(clippy::default_trait_access)]
#![allow(clippy::unused_async)]

pub mod chat;
pub mod config;
pub mod fleet;
pub mod server;
pub mod ui;
pub mod validate;

use std::sync::Arc;

use crate::chat::{ChatBackend, WidgetStore};
use crate::config::AppConfig;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Live chat widgets, one per rendered page.
    pub widgets: WidgetStore,
    /// Transport to the assistant endpoint.
    pub backend: Arc<dyn ChatBackend>,
    /// Page token embedded in forms and echoed to the assistant endpoint.
    /// Issued per process; the verification policy is the endpoint's.
    pub csrf_token: String,
    /// Global configuration.
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Assemble the state with a fresh widget store and page token.
    #[must_use]
    pub fn new(backend: Arc<dyn ChatBackend>, config: Arc<AppConfig>) -> Self {
        Self {
            widgets: WidgetStore::new(),
            backend,
            csrf_token: uuid::Uuid::new_v4().to_string(),
            config,
        }
    }
}
