//! Chat input area.

use crate::ui::escape_html;

/// The send form.
///
/// Submission appends the reply bubble into `#chat-messages`; the user's
/// own bubble is appended locally before the request leaves (via
/// `textContent`, so no markup can sneak in), the input clears, and the
/// typing indicator is raised for the duration. Enter sends, Shift+Enter
/// keeps its newline. The send control is disabled while a request is in
/// flight, which is the client half of the single-flight guard.
#[must_use]
pub fn input_area(widget_id: &str, csrf_token: &str) -> String {
    let csrf = escape_html(csrf_token);
    format!(
        r##"<form id="chat-form" class="chat-input d-flex gap-2 p-2"
      hx-post="/api/chat"
      hx-target="#chat-messages"
      hx-swap="beforeend"
      hx-indicator="#typing-indicator"
      hx-disabled-elt="find button[type=submit]"
      hx-on--before-request="const field = this.querySelector('[name=message]'); const msg = field.value.trim(); if (msg) {{ const wrap = document.createElement('div'); wrap.className = 'message user-message'; const body = document.createElement('div'); body.className = 'message-content'; body.textContent = msg; wrap.appendChild(body); const list = document.getElementById('chat-messages'); list.appendChild(wrap); list.scrollTop = list.scrollHeight; }} this.reset(); field.dispatchEvent(new Event('input', {{ bubbles: true }}));"
      x-data="{{ message: '' }}">
    <input type="hidden" name="widget" value="{widget_id}">
    <input type="hidden" name="csrfmiddlewaretoken" value="{csrf}">
    <textarea id="chat-input" name="message" rows="1" placeholder="Type your message..."
              class="form-control chat-textarea"
              x-model="message"
              x-init="$el.focus()"
              x-on:keydown.enter="if (!$event.shiftKey) {{ $event.preventDefault(); if (message.trim() && !$el.form.classList.contains('htmx-request')) {{ $el.form.requestSubmit(); }} }}"></textarea>
    <button type="submit" id="chat-send" class="btn btn-primary chat-send" aria-label="Send message"
            x-bind:disabled="!message.trim()">
        <svg width="16" height="16" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" aria-hidden="true">
            <line x1="22" y1="2" x2="11" y2="13"/>
            <polygon points="22 2 15 22 11 13 2 9 22 2"/>
        </svg>
    </button>
</form>"##
    )
}
