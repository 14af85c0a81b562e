//! Result types produced by the import pipeline.
//!
//! An import run produces an [`ImportResult`]: the number of processed rows, a severity-tagged
//! list of [`ImportIssue`]s and the ranked [`FieldMapping`] suggestions for the header row.

use serde::{Deserialize, Serialize};

use crate::mapping::CanonicalField;

/// Severity of an [`ImportIssue`].
///
/// Only [`IssueSeverity::Error`] blocks success; warnings are informational.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueSeverity {
    /// Fatal for the file (admission/decode) or for the row (missing required value).
    Error,
    /// Suspicious value that does not block the import.
    Warning,
}

/// A single problem found while importing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportIssue {
    /// Logical row number: `0` for file-level issues, otherwise data-row index + 2
    /// (the header occupies row 1).
    pub row: usize,
    /// Header text of the offending column, `"all"` for whole-row issues, or `"file"`/`"system"`
    /// for file-level issues.
    pub column: String,
    /// Human readable description.
    pub message: String,
    /// Issue severity.
    pub severity: IssueSeverity,
}

impl ImportIssue {
    /// Create an error-severity issue.
    pub fn error(row: usize, column: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            row,
            column: column.into(),
            message: message.into(),
            severity: IssueSeverity::Error,
        }
    }

    /// Create a warning-severity issue.
    pub fn warning(row: usize, column: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            row,
            column: column.into(),
            message: message.into(),
            severity: IssueSeverity::Warning,
        }
    }

    /// Whether this issue blocks success.
    pub fn is_error(&self) -> bool {
        self.severity == IssueSeverity::Error
    }
}

/// A suggested mapping from a source column header to a canonical field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldMapping {
    /// Raw header text as it appeared in the file.
    pub source_column: String,
    /// Canonical field the column most likely denotes.
    pub target_field: CanonicalField,
    /// Confidence in `(0.6, 1.0]`.
    pub confidence: f64,
}

/// Outcome of [`crate::ingestion::process_file`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportResult {
    /// `true` iff `errors` contains no error-severity issue.
    pub success: bool,
    /// Number of data rows (excluding the header).
    pub processed_rows: usize,
    /// Every issue found, file-level and per-row.
    pub errors: Vec<ImportIssue>,
    /// Ranked column-to-field suggestions.
    pub suggestions: Vec<FieldMapping>,
}

impl ImportResult {
    /// Build a result, deriving `success` from the issue list.
    pub fn new(processed_rows: usize, errors: Vec<ImportIssue>, suggestions: Vec<FieldMapping>) -> Self {
        let success = !errors.iter().any(ImportIssue::is_error);
        Self {
            success,
            processed_rows,
            errors,
            suggestions,
        }
    }

    /// A failed result carrying one file-level issue.
    pub fn rejected(issue: ImportIssue) -> Self {
        Self::new(0, vec![issue], Vec::new())
    }

    /// Number of error-severity issues.
    pub fn error_count(&self) -> usize {
        self.errors.iter().filter(|i| i.is_error()).count()
    }

    /// Number of warning-severity issues.
    pub fn warning_count(&self) -> usize {
        self.errors.len() - self.error_count()
    }
}
