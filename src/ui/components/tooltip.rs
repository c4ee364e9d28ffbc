//! Hover affordances: Bootstrap tooltips and status ribbons.

use crate::ui::escape_html;

/// Attributes that flag an element as a tooltip trigger and attach the
/// Bootstrap tooltip behavior to it on init.
///
/// The tooltip widget itself is vendor code; this is only the attach
/// point. Splice the returned string into the element's attribute list.
#[must_use]
pub fn tooltip_attrs(title: &str) -> String {
    format!(
        r#"data-bs-toggle="tooltip" data-bs-title="{}" x-init="window.bootstrap && new bootstrap.Tooltip($el)""#,
        escape_html(title)
    )
}

/// A status ribbon with the locally-implemented hover tooltip.
///
/// Pointer-enter makes the child tooltip visible, pointer-leave hides it
/// again; the toggle is instantaneous, any transition lives in CSS.
#[must_use]
pub fn status_ribbon(ribbon_class: &str, label: &str, note: &str) -> String {
    format!(
        r#"<span class="{ribbon_class}" x-data
      x-on:mouseenter="$refs.tip.style.opacity = '1'; $refs.tip.style.visibility = 'visible'"
      x-on:mouseleave="$refs.tip.style.opacity = '0'; $refs.tip.style.visibility = 'hidden'">
    {label}
    <span class="ribbon-tooltip" x-ref="tip">{note}</span>
</span>"#,
        label = escape_html(label),
        note = escape_html(note),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tooltip_attrs_escape_title() {
        let attrs = tooltip_attrs(r#"uses "quotes" & <tags>"#);
        assert!(attrs.contains("data-bs-toggle"));
        assert!(!attrs.contains(r#""quotes""#));
        assert!(attrs.contains("&quot;quotes&quot;"));
    }

    #[test]
    fn test_ribbon_carries_note() {
        let html = status_ribbon("status-ribbon ribbon-ok", "Ready", "All clear");
        assert!(html.contains("ribbon-tooltip"));
        assert!(html.contains("All clear"));
        assert!(html.contains("mouseenter"));
    }
}
