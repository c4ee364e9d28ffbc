//! Reusable markup helpers shared across pages and fragments.
//!
//! - [`alert`] / [`oob_alert`]: transient, self-dismissing banners
//! - [`submit_button`]: submit control with a built-in loading state
//! - [`tooltip_attrs`] / [`status_ribbon`]: hover affordances
//! - [`field_error`]: field-local validation message

mod alert;
mod button;
mod tooltip;

pub use alert::{AlertLevel, alert, oob_alert};
pub use button::submit_button;
pub use tooltip::{status_ribbon, tooltip_attrs};

use crate::ui::escape_html;

/// Field-local validation error, attached directly under the input.
#[must_use]
pub fn field_error(message: &str) -> String {
    format!(
        r#"<div class="invalid-feedback d-block">{}</div>"#,
        escape_html(message)
    )
}
