//! Chat message list and bubbles.

use crate::chat::{Message, MessageRole};
use crate::ui::escape_html;

/// Scrollable message list, pre-filled with the widget's transcript.
///
/// The list pins itself to the bottom on load and after every append, so
/// the newest message is always in view. The typing indicator sits just
/// below the list and is raised by HTMX for the duration of a send.
#[must_use]
pub fn message_list(transcript: &[Message]) -> String {
    let bubbles: String = transcript.iter().map(message_bubble).collect();
    format!(
        r#"<div id="chat-messages" class="chat-messages"
     x-init="$el.scrollTop = $el.scrollHeight"
     hx-on--after-swap="this.scrollTop = this.scrollHeight">
    {bubbles}
</div>
{indicator}"#,
        indicator = typing_indicator()
    )
}

/// One transcript bubble. The message text is escaped here, at the last
/// moment before it becomes markup.
#[must_use]
pub fn message_bubble(message: &Message) -> String {
    let side = match message.role {
        MessageRole::User => "user-message",
        MessageRole::Bot => "bot-message",
    };
    format!(
        r#"<div class="message {side}"><div class="message-content">{}</div></div>"#,
        escape_html(&message.content)
    )
}

/// The transient typing placeholder.
///
/// Referenced by the send form's `hx-indicator`: HTMX shows it while the
/// request is in flight and hides it at settlement, before the reply
/// bubble is appended. Exactly one exists per panel.
#[must_use]
pub fn typing_indicator() -> String {
    r#"<div id="typing-indicator" class="message bot-message typing-indicator" aria-hidden="true">
    <div class="message-content">
        <span class="typing-dots"><span></span><span></span><span></span></span>
    </div>
</div>"#
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bubble_escapes_content() {
        let bubble = message_bubble(&Message::user("<script>alert('x')</script>"));
        assert!(!bubble.contains("<script>"));
        assert!(bubble.contains("&lt;script&gt;"));
        assert!(bubble.contains("user-message"));
    }

    #[test]
    fn test_list_renders_transcript_in_order() {
        let transcript = vec![Message::user("Hi"), Message::bot("Hello!")];
        let list = message_list(&transcript);
        let user_at = list.find("user-message").unwrap();
        let bot_at = list.find("bot-message").unwrap();
        assert!(user_at < bot_at);
        assert!(list.contains("typing-indicator"));
    }
}
