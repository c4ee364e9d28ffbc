//! Submit button with a structural loading state.

use crate::ui::escape_html;

/// A submit control that swaps its label for a spinner while the owning
/// form's request is in flight.
///
/// Both the resting label and the spinner+label pair are permanent child
/// nodes toggled by CSS on the form's `htmx-request` class, so the
/// original label is preserved by construction — repeated in-flight
/// windows can never overwrite it. Pair with `hx-disabled-elt` on the
/// form to also disable the control for the duration.
#[must_use]
pub fn submit_button(id: &str, label: &str, loading_label: &str) -> String {
    format!(
        r#"<button type="submit" id="{id}" class="btn btn-primary submit-btn">
    <span class="btn-label">{label}</span>
    <span class="btn-loading">
        <span class="spinner-border spinner-border-sm me-2" role="status" aria-hidden="true"></span>{loading}
    </span>
</button>"#,
        label = escape_html(label),
        loading = escape_html(loading_label),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_keeps_both_labels_in_markup() {
        let html = submit_button("save-btn", "Save entry", "Saving...");
        assert!(html.contains("Save entry"));
        assert!(html.contains("Saving..."));
        assert!(html.contains("spinner-border"));
    }
}
