//! Upload validation.
//!
//! Every file reaches one validation function, whether it arrived through a
//! file picker or was dropped onto an upload zone (the drop handler routes
//! dropped files into the field and re-fires its change trigger, so both
//! paths post the same multipart request).
//!
//! A field's category is resolved from its context: the id names
//! certificates outright, otherwise the accept hint decides, with plain
//! documents as the fallback.

use thiserror::Error;

/// Fixed size ceiling for any upload (10 MiB).
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// Validation rule-set bucket an upload field belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadCategory {
    /// Fleet data as CSV.
    Csv,
    /// Fleet data as Excel workbooks.
    Excel,
    /// General documents and scans.
    Document,
    /// Fitness certificates (same formats as documents).
    Certificate,
}

impl UploadCategory {
    /// Allowed extensions for this category, lowercased, with the dot.
    #[must_use]
    pub fn allowed_extensions(self) -> &'static [&'static str] {
        match self {
            Self::Csv => &[".csv"],
            Self::Excel => &[".xlsx", ".xls"],
            Self::Document | Self::Certificate => &[".pdf", ".jpg", ".jpeg", ".png"],
        }
    }
}

/// The declared context of an upload field: its element id and accept hint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldContext {
    /// Element id of the file input.
    pub id: String,
    /// The input's `accept` attribute, verbatim.
    pub accept: String,
}

impl FieldContext {
    /// Build a context from id and accept hint.
    #[must_use]
    pub fn new(id: impl Into<String>, accept: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            accept: accept.into(),
        }
    }

    /// Resolve the validation category for this field.
    #[must_use]
    pub fn category(&self) -> UploadCategory {
        if self.id.contains("certificate") {
            UploadCategory::Certificate
        } else if self.accept.contains("csv") {
            UploadCategory::Csv
        } else if self.accept.contains("xlsx") {
            UploadCategory::Excel
        } else {
            UploadCategory::Document
        }
    }
}

/// Why an upload was rejected. The display strings double as alert copy.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UploadError {
    /// Over the fixed size ceiling.
    #[error("File size must be less than 10MB")]
    TooLarge,
    /// Extension not in the field category's allowed set.
    #[error("Please select a valid file type: {}", allowed.join(", "))]
    BadExtension {
        /// The allowed set, for the alert message.
        allowed: Vec<&'static str>,
    },
}

/// Lowercased extension of a file name, with the dot; `None` when there is
/// no `.` in the name.
#[must_use]
pub fn extension(file_name: &str) -> Option<String> {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| format!(".{}", ext.to_lowercase()))
}

/// Validate one upload against its field's category.
///
/// Size is checked first, so an oversized file is rejected regardless of
/// extension.
pub fn validate_upload(
    file_name: &str,
    size: u64,
    category: UploadCategory,
) -> Result<(), UploadError> {
    if size > MAX_UPLOAD_BYTES {
        return Err(UploadError::TooLarge);
    }

    let allowed = category.allowed_extensions();
    let ext = extension(file_name).unwrap_or_default();
    if !allowed.contains(&ext.as_str()) {
        let declared = mime_guess::from_path(file_name).first_or_octet_stream();
        tracing::debug!(
            name: "upload.rejected",
            file = %file_name,
            mime = %declared,
            category = ?category,
            "Upload extension not allowed for field category"
        );
        return Err(UploadError::BadExtension {
            allowed: allowed.to_vec(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_resolution() {
        let cert = FieldContext::new("certificate-upload", ".pdf,.jpg,.jpeg,.png");
        assert_eq!(cert.category(), UploadCategory::Certificate);

        // The id wins even over a csv accept hint.
        let cert_csv = FieldContext::new("train-certificate", ".csv");
        assert_eq!(cert_csv.category(), UploadCategory::Certificate);

        let csv = FieldContext::new("file-input", ".csv,.xlsx,.xls");
        assert_eq!(csv.category(), UploadCategory::Csv);

        let excel = FieldContext::new("file-input", ".xlsx,.xls");
        assert_eq!(excel.category(), UploadCategory::Excel);

        let doc = FieldContext::new("attachment", ".pdf");
        assert_eq!(doc.category(), UploadCategory::Document);
    }

    #[test]
    fn test_oversize_rejected_regardless_of_extension() {
        let eleven_mib = 11 * 1024 * 1024;
        for category in [
            UploadCategory::Csv,
            UploadCategory::Excel,
            UploadCategory::Document,
            UploadCategory::Certificate,
        ] {
            assert_eq!(
                validate_upload("fleet.csv", eleven_mib, category),
                Err(UploadError::TooLarge)
            );
        }
    }

    #[test]
    fn test_boundary_size_accepted() {
        assert!(validate_upload("fleet.csv", MAX_UPLOAD_BYTES, UploadCategory::Csv).is_ok());
        assert_eq!(
            validate_upload("fleet.csv", MAX_UPLOAD_BYTES + 1, UploadCategory::Csv),
            Err(UploadError::TooLarge)
        );
    }

    #[test]
    fn test_extension_per_category() {
        assert!(validate_upload("fleet.csv", 1024, UploadCategory::Csv).is_ok());
        assert!(matches!(
            validate_upload("fleet.csv", 1024, UploadCategory::Excel),
            Err(UploadError::BadExtension { .. })
        ));
        assert!(validate_upload("fleet.XLSX", 1024, UploadCategory::Excel).is_ok());
        assert!(validate_upload("scan.JPEG", 1024, UploadCategory::Certificate).is_ok());
        assert!(matches!(
            validate_upload("notes.txt", 1024, UploadCategory::Document),
            Err(UploadError::BadExtension { .. })
        ));
    }

    #[test]
    fn test_extension_is_last_segment() {
        assert_eq!(extension("a.b.csv").as_deref(), Some(".csv"));
        assert_eq!(extension("archive.tar.GZ").as_deref(), Some(".gz"));
        assert_eq!(extension("no-extension"), None);
        // A name with no dot never matches any allowed set.
        assert!(matches!(
            validate_upload("no-extension", 1024, UploadCategory::Csv),
            Err(UploadError::BadExtension { .. })
        ));
    }

    #[test]
    fn test_rejection_message_lists_allowed_set() {
        let err = validate_upload("fleet.csv", 1024, UploadCategory::Excel).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Please select a valid file type: .xlsx, .xls"
        );
        assert_eq!(
            UploadError::TooLarge.to_string(),
            "File size must be less than 10MB"
        );
    }
}
