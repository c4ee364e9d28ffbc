//! Transient alert banners.

use crate::ui::escape_html;

/// Visual severity of an alert banner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AlertLevel {
    /// Neutral information.
    #[default]
    Info,
    /// Completed action.
    Success,
    /// Rejected input, recoverable.
    Warning,
    /// Failed action.
    Danger,
}

impl AlertLevel {
    /// Get CSS classes for this level.
    #[must_use]
    pub fn classes(self) -> &'static str {
        match self {
            Self::Info => "alert-info",
            Self::Success => "alert-success",
            Self::Warning => "alert-warning",
            Self::Danger => "alert-danger",
        }
    }
}

/// A dismissible banner that removes itself after five seconds.
///
/// Banners stack in `#alert-stack`; each one runs its own timer, so a
/// burst of alerts dismisses one by one, oldest first.
#[must_use]
pub fn alert(message: &str, level: AlertLevel) -> String {
    format!(
        r#"<div class="alert {classes} alert-dismissible fade show app-alert" role="alert"
     x-data x-init="setTimeout(() => $el.remove(), 5000)">
    {message}
    <button type="button" class="btn-close" data-bs-dismiss="alert" aria-label="Close"></button>
</div>"#,
        classes = level.classes(),
        message = escape_html(message),
    )
}

/// An [`alert`] that rides along any fragment response and lands in the
/// page's alert stack via an out-of-band swap.
#[must_use]
pub fn oob_alert(message: &str, level: AlertLevel) -> String {
    format!(
        r#"<div hx-swap-oob="beforeend:#alert-stack">{}</div>"#,
        alert(message, level)
    )
}
