//! Chat widget mount: launcher and panel states.

use crate::chat::ChatWidget;

use super::header::panel_header;
use super::input_area::input_area;
use super::message_list::message_list;

/// Render the widget mount in whichever state the controller is in.
#[must_use]
pub fn widget_mount(widget: &ChatWidget, csrf_token: &str) -> String {
    if widget.is_open() {
        panel(widget, csrf_token)
    } else {
        launcher(widget.id())
    }
}

/// Closed state: the floating toggle button.
#[must_use]
pub fn launcher(widget_id: &str) -> String {
    format!(
        r##"<div id="chat-widget" class="chat-widget">
    <button type="button" id="chat-toggle" class="chat-toggle btn btn-primary rounded-circle shadow"
            aria-label="Open assistant"
            hx-post="/api/chat/open"
            hx-target="#chat-widget"
            hx-swap="outerHTML"
            hx-vals='{{"widget":"{widget_id}"}}'>
        <svg width="22" height="22" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" aria-hidden="true">
            <path d="M21 15a2 2 0 0 1-2 2H7l-4 4V5a2 2 0 0 1 2-2h14a2 2 0 0 1 2 2z"/>
        </svg>
    </button>
</div>"##
    )
}

/// Open state: header, transcript, indicator, and input.
fn panel(widget: &ChatWidget, csrf_token: &str) -> String {
    format!(
        r#"<div id="chat-widget" class="chat-widget active">
    <div class="chat-panel card shadow-lg">
        {header}
        {messages}
        {input}
    </div>
</div>"#,
        header = panel_header(widget.id()),
        messages = message_list(&widget.transcript()),
        input = input_area(widget.id(), csrf_token),
    )
}
