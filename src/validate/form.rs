//! Generic form validation.
//!
//! Runs in full on every submit attempt: required fields must be non-empty
//! after trim, email fields with a value must look like `local@domain.tld`.
//! Each failing field carries exactly one error; a re-render of the form
//! from the result set is what clears stale errors.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

/// Error copy for a blank required field.
pub const REQUIRED_MESSAGE: &str = "This field is required";

/// Error copy for a malformed email value.
pub const EMAIL_MESSAGE: &str = "Please enter a valid email address";

/// No whitespace or extra `@` in local/domain, at least one dot in the
/// domain.
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// Input type of a form field, as far as validation cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text.
    Text,
    /// Email address; shape-checked when non-empty.
    Email,
}

/// Declaration of one validatable field.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    /// Form field name.
    pub name: &'static str,
    /// Human label, used by the markup layer.
    pub label: &'static str,
    /// Input type.
    pub kind: FieldKind,
    /// Whether a value is mandatory.
    pub required: bool,
}

/// A field-local validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Name of the failing field.
    pub field: &'static str,
    /// Message to attach next to the field.
    pub message: &'static str,
}

/// Shape-check an email address.
#[must_use]
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

/// Validate submitted values against the field declarations.
///
/// Missing keys count as empty. At most one error is reported per field:
/// a blank required email reports the required message, not both.
#[must_use]
pub fn validate_fields(
    specs: &[FieldSpec],
    values: &HashMap<String, String>,
) -> Vec<FieldError> {
    let mut errors = Vec::new();

    for spec in specs {
        let value = values.get(spec.name).map(String::as_str).unwrap_or("");
        let trimmed = value.trim();

        if spec.required && trimmed.is_empty() {
            errors.push(FieldError {
                field: spec.name,
                message: REQUIRED_MESSAGE,
            });
            continue;
        }

        if spec.kind == FieldKind::Email && !trimmed.is_empty() && !is_valid_email(trimmed) {
            errors.push(FieldError {
                field: spec.name,
                message: EMAIL_MESSAGE,
            });
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn specs() -> Vec<FieldSpec> {
        vec![
            FieldSpec {
                name: "operator_name",
                label: "Operator name",
                kind: FieldKind::Text,
                required: true,
            },
            FieldSpec {
                name: "operator_email",
                label: "Contact email",
                kind: FieldKind::Email,
                required: true,
            },
            FieldSpec {
                name: "remarks",
                label: "Remarks",
                kind: FieldKind::Text,
                required: false,
            },
        ]
    }

    fn values(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_email_shape() {
        assert!(is_valid_email("a@b.co"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@c.co"));
        assert!(!is_valid_email("a@b c.co"));
        assert!(!is_valid_email("@b.co"));
        assert!(!is_valid_email("a@@b.co"));
    }

    #[test]
    fn test_blank_required_field_blocks() {
        let errs = validate_fields(
            &specs(),
            &values(&[("operator_name", "  "), ("operator_email", "a@b.co")]),
        );
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].field, "operator_name");
        assert_eq!(errs[0].message, REQUIRED_MESSAGE);
    }

    #[test]
    fn test_filled_form_passes() {
        let errs = validate_fields(
            &specs(),
            &values(&[("operator_name", "Anil"), ("operator_email", "anil@kmrl.co.in")]),
        );
        assert!(errs.is_empty());
    }

    #[test]
    fn test_one_error_per_field() {
        // Blank required email: the required message wins, not both.
        let errs = validate_fields(
            &specs(),
            &values(&[("operator_name", "Anil"), ("operator_email", "")]),
        );
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].message, REQUIRED_MESSAGE);

        let errs = validate_fields(
            &specs(),
            &values(&[("operator_name", "Anil"), ("operator_email", "not-an-email")]),
        );
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].message, EMAIL_MESSAGE);
    }

    #[test]
    fn test_optional_fields_may_be_absent() {
        // "remarks" missing entirely from the submitted values.
        let errs = validate_fields(
            &specs(),
            &values(&[("operator_name", "Anil"), ("operator_email", "a@b.co")]),
        );
        assert!(errs.is_empty());
    }

    #[test]
    fn test_revalidation_clears_resolved_errors() {
        let mut submitted = values(&[("operator_name", ""), ("operator_email", "bad")]);
        let first = validate_fields(&specs(), &submitted);
        assert_eq!(first.len(), 2);

        submitted.insert("operator_name".to_string(), "Anil".to_string());
        submitted.insert("operator_email".to_string(), "anil@kmrl.co.in".to_string());
        let second = validate_fields(&specs(), &submitted);
        assert!(second.is_empty());
    }
}
