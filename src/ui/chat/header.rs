//! Chat panel header.

/// Panel header with title and the close affordance.
///
/// Closing posts back so the widget's open/closed state stays with the
/// controller; the transcript survives the swap to the launcher.
#[must_use]
pub fn panel_header(widget_id: &str) -> String {
    format!(
        r##"<header class="chat-header d-flex align-items-center justify-content-between px-3 py-2">
    <div class="d-flex align-items-center gap-2">
        <span class="chat-presence" aria-hidden="true"></span>
        <h2 class="h6 mb-0">Metro Assistant</h2>
    </div>
    <button type="button" id="chat-close" class="btn-close btn-close-white" aria-label="Close chat"
            hx-post="/api/chat/close"
            hx-target="#chat-widget"
            hx-swap="outerHTML"
            hx-vals='{{"widget":"{widget_id}"}}'></button>
</header>"##
    )
}
