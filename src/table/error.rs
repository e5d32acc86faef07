//! Upload error taxonomy.
//!
//! Messages are shown to the user verbatim, so they carry positions and
//! offending values but never raw parser diagnostics.

use thiserror::Error;

/// Reasons an uploaded table is rejected
#[derive(Debug, Clone, PartialEq, Error)]
pub enum UploadError {
    #[error("No file was uploaded.")]
    MissingFile,

    #[error("The upload could not be read.")]
    Unreadable,

    #[error("The uploaded file exceeds the {limit} byte size limit.")]
    TooLarge { limit: usize },

    #[error("The uploaded file is empty.")]
    Empty,

    #[error("The uploaded CSV has a header row but no data rows.")]
    NoRows,

    #[error("The uploaded file is not valid UTF-8 text (invalid byte at offset {offset}).")]
    Encoding { offset: usize },

    #[error("The uploaded CSV is malformed at line {line}: {detail}.")]
    Malformed { line: u64, detail: String },

    #[error("The uploaded CSV must have a `{0}` column.")]
    MissingColumn(String),

    #[error("Value {value:?} in column `{column}` at row {row} is not a number.")]
    InvalidNumber {
        column: String,
        row: usize,
        value: String,
    },
}

impl UploadError {
    /// Stable machine-readable kind for API clients
    pub fn kind(&self) -> &'static str {
        match self {
            UploadError::MissingFile => "missing_file",
            UploadError::Unreadable => "unreadable_upload",
            UploadError::TooLarge { .. } => "file_too_large",
            UploadError::Empty => "empty_file",
            UploadError::NoRows => "no_rows",
            UploadError::Encoding { .. } => "encoding_error",
            UploadError::Malformed { .. } => "malformed_file",
            UploadError::MissingColumn(_) => "missing_column",
            UploadError::InvalidNumber { .. } => "invalid_number",
        }
    }

    /// Whether the file parsed but its content is unusable
    pub fn is_content_error(&self) -> bool {
        matches!(
            self,
            UploadError::MissingColumn(_) | UploadError::InvalidNumber { .. }
        )
    }

    /// Translate a csv reader error without exposing its text
    pub(crate) fn from_csv(err: &csv::Error, fallback_line: u64) -> Self {
        let line = err
            .position()
            .map(|p| p.line())
            .unwrap_or(fallback_line);

        match err.kind() {
            csv::ErrorKind::Utf8 { err: utf8, .. } => UploadError::Encoding {
                offset: utf8.valid_up_to(),
            },
            csv::ErrorKind::UnequalLengths {
                expected_len, len, ..
            } => UploadError::Malformed {
                line,
                detail: format!("expected {} fields, found {}", expected_len, len),
            },
            _ => UploadError::Malformed {
                line,
                detail: "unreadable record".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_column_message() {
        let err = UploadError::MissingColumn("YearsExperience".to_string());
        assert_eq!(
            err.to_string(),
            "The uploaded CSV must have a `YearsExperience` column."
        );
        assert!(err.is_content_error());
        assert_eq!(err.kind(), "missing_column");
    }

    #[test]
    fn test_structural_errors_are_not_content_errors() {
        assert!(!UploadError::Empty.is_content_error());
        assert!(!UploadError::Encoding { offset: 3 }.is_content_error());
    }
}
