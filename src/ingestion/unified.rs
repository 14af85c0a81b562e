//! Import orchestration.
//!
//! [`process_file`] runs the full pipeline over an uploaded file:
//!
//! admission (format, size) → decode → header/body split → field mapping → row validation
//! → [`ImportResult`].
//!
//! Every failure is returned as data: admission and decode problems become a single
//! file-level [`ImportIssue`] with `success = false`; row problems are listed per row and
//! never abort the run.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::error::{DecodeResult, ImportError};
use crate::mapping::map_headers;
use crate::types::{FieldMapping, ImportIssue, ImportResult};

use super::csv;
use super::observability::{ImportContext, ImportObserver, ImportSeverity, ImportStats};
use super::table::{ImportFile, ImportFormat, RawTable};
use super::validation::validate_rows;

/// Upload size ceiling: 10 MiB.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Number of body rows returned by [`generate_preview_data`].
pub const DEFAULT_PREVIEW_ROWS: usize = 5;

/// A preview row keyed by canonical field id (or the original header when unmapped).
pub type PreviewRow = BTreeMap<String, String>;

/// How to choose the sheet when decoding a workbook.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SheetSelection {
    /// Decode the first sheet (default).
    #[default]
    First,
    /// Decode a single named sheet.
    Sheet(String),
}

/// Options controlling import behavior.
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct ImportOptions {
    /// If `None`, detect the format from the file extension, then the media type.
    pub format: Option<ImportFormat>,
    /// Workbook-specific options.
    pub sheet_selection: SheetSelection,
    /// Files larger than this are rejected before decoding.
    pub max_file_size: u64,
    /// Maximum number of rows returned by [`generate_preview_data`].
    pub preview_rows: usize,
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn ImportObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: ImportSeverity,
}

impl fmt::Debug for ImportOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImportOptions")
            .field("format", &self.format)
            .field("sheet_selection", &self.sheet_selection)
            .field("max_file_size", &self.max_file_size)
            .field("preview_rows", &self.preview_rows)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            format: None,
            sheet_selection: SheetSelection::default(),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            preview_rows: DEFAULT_PREVIEW_ROWS,
            observer: None,
            alert_at_or_above: ImportSeverity::Critical,
        }
    }
}

/// Import an uploaded file: decode it, suggest field mappings and validate every row.
///
/// When an observer is configured, this function reports:
///
/// - `on_success` when the file was decoded, with row/issue counts
/// - `on_failure` when the file was rejected or could not be decoded
/// - `on_alert` on failure when the computed severity is >= `options.alert_at_or_above`
///
/// # Examples
///
/// ```rust
/// use maintenance_import::ingestion::{process_file, ImportFile, ImportOptions};
///
/// let csv = "設備ID,設備名\n,ポンプA-1\n";
/// let file = ImportFile::new("equipment.csv", None, csv.as_bytes().to_vec());
///
/// let result = process_file(&file, &ImportOptions::default());
/// assert!(!result.success);
/// assert_eq!(result.processed_rows, 1);
/// assert_eq!(result.errors[0].row, 2);
/// ```
pub fn process_file(file: &ImportFile, options: &ImportOptions) -> ImportResult {
    let mut ctx = ImportContext::for_file(file);

    let table = match admit_and_decode(file, options, &mut ctx) {
        Ok(table) => table,
        Err(e) => {
            report_failure(options, &ctx, &e);
            return ImportResult::rejected(issue_for_error(&e));
        }
    };

    let suggestions = map_headers(&table.headers);
    let errors = validate_rows(&table.headers, &table.rows);
    let result = ImportResult::new(table.row_count(), errors, suggestions);

    if let Some(obs) = options.observer.as_ref() {
        obs.on_success(
            &ctx,
            ImportStats {
                rows: result.processed_rows,
                errors: result.error_count(),
                warnings: result.warning_count(),
                mappings: result.suggestions.len(),
            },
        );
    }

    result
}

/// Re-decode `file` and return up to `options.preview_rows` body rows keyed by mapped field.
///
/// Each column is keyed by the target field of its highest-confidence mapping, falling back to
/// the original header text. Any admission or decode failure yields an empty preview.
pub fn generate_preview_data(file: &ImportFile, mappings: &[FieldMapping], options: &ImportOptions) -> Vec<PreviewRow> {
    let mut ctx = ImportContext::for_file(file);
    let Ok(table) = admit_and_decode(file, options, &mut ctx) else {
        return Vec::new();
    };

    let keys: Vec<String> = table.headers.iter().map(|h| preview_key(h, mappings)).collect();

    table
        .rows
        .iter()
        .take(options.preview_rows)
        .map(|row| {
            keys.iter()
                .enumerate()
                .map(|(col, key)| (key.clone(), row.get(col).cloned().unwrap_or_default()))
                .collect()
        })
        .collect()
}

/// Run admission checks and decode the file into a table with at least one body row.
pub fn decode_file(file: &ImportFile, options: &ImportOptions) -> DecodeResult<RawTable> {
    let mut ctx = ImportContext::for_file(file);
    admit_and_decode(file, options, &mut ctx)
}

fn admit_and_decode(file: &ImportFile, options: &ImportOptions, ctx: &mut ImportContext) -> DecodeResult<RawTable> {
    let fmt = match options.format {
        Some(f) => f,
        None => file.detect_format()?,
    };
    ctx.format = Some(fmt);

    if file.size() > options.max_file_size {
        return Err(ImportError::FileTooLarge {
            size: file.size(),
            limit: options.max_file_size,
        });
    }

    let table = match fmt {
        ImportFormat::Csv => csv::decode_csv_from_bytes(&file.bytes)?,
        ImportFormat::Excel => decode_excel_dispatch(&file.bytes, &options.sheet_selection)?,
    };

    if table.headers.iter().all(|h| h.trim().is_empty()) {
        return Err(ImportError::NoSheet {
            message: "header row is empty".to_string(),
        });
    }
    if table.rows.is_empty() {
        return Err(ImportError::NoDataRows);
    }
    Ok(table)
}

fn preview_key(header: &str, mappings: &[FieldMapping]) -> String {
    let label = header.trim();
    mappings
        .iter()
        .filter(|m| m.source_column == label)
        .max_by(|a, b| a.confidence.total_cmp(&b.confidence))
        .map(|m| m.target_field.as_str().to_string())
        .unwrap_or_else(|| header.to_string())
}

/// Convert a fatal error into the single file-level issue reported for it.
fn issue_for_error(e: &ImportError) -> ImportIssue {
    if e.is_admission() {
        ImportIssue::error(0, "file", e.to_string())
    } else {
        ImportIssue::error(0, "system", format!("failed to read file: {e}"))
    }
}

fn report_failure(options: &ImportOptions, ctx: &ImportContext, e: &ImportError) {
    if let Some(obs) = options.observer.as_ref() {
        let sev = severity_for_error(e);
        obs.on_failure(ctx, sev, e);
        if sev >= options.alert_at_or_above {
            obs.on_alert(ctx, sev, e);
        }
    }
}

fn severity_for_error(e: &ImportError) -> ImportSeverity {
    match e {
        ImportError::Io(_) => ImportSeverity::Critical,
        ImportError::Csv(err) => match err.kind() {
            ::csv::ErrorKind::Io(_) => ImportSeverity::Critical,
            _ => ImportSeverity::Error,
        },
        #[cfg(feature = "excel")]
        ImportError::Excel(_) => ImportSeverity::Error,
        ImportError::UnsupportedFormat { .. }
        | ImportError::FileTooLarge { .. }
        | ImportError::NoSheet { .. }
        | ImportError::NoDataRows
        | ImportError::Json(_)
        | ImportError::Decode { .. } => ImportSeverity::Error,
    }
}

fn decode_excel_dispatch(bytes: &[u8], sel: &SheetSelection) -> DecodeResult<RawTable> {
    // Avoid unused warnings when the feature is off.
    let _ = (bytes, sel);

    #[cfg(feature = "excel")]
    {
        use super::excel;

        match sel {
            SheetSelection::First => excel::decode_excel_from_bytes(bytes, None),
            SheetSelection::Sheet(name) => excel::decode_excel_from_bytes(bytes, Some(name.as_str())),
        }
    }

    #[cfg(not(feature = "excel"))]
    {
        Err(ImportError::Decode {
            message: "excel decoding not enabled (enable cargo feature 'excel')".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{generate_preview_data, process_file, ImportOptions};
    use crate::ingestion::ImportFile;
    use crate::mapping::map_headers;
    use crate::types::IssueSeverity;

    fn csv_file(name: &str, body: &str) -> ImportFile {
        ImportFile::new(name, None, body.as_bytes().to_vec())
    }

    #[test]
    fn rejects_unsupported_extension_with_single_file_issue() {
        let res = process_file(&csv_file("report.pdf", "a,b\n1,2\n"), &ImportOptions::default());
        assert!(!res.success);
        assert_eq!(res.processed_rows, 0);
        assert_eq!(res.errors.len(), 1);
        assert_eq!(res.errors[0].row, 0);
        assert_eq!(res.errors[0].column, "file");
        assert_eq!(res.errors[0].severity, IssueSeverity::Error);
    }

    #[test]
    fn rejects_oversized_file_before_decoding() {
        let opts = ImportOptions {
            max_file_size: 8,
            ..Default::default()
        };
        let res = process_file(&csv_file("big.csv", "設備ID\nP-1\nP-2\n"), &opts);
        assert!(!res.success);
        assert!(res.errors[0].message.contains("file too large"));
    }

    #[test]
    fn header_only_file_has_no_data_rows() {
        let res = process_file(&csv_file("empty.csv", "設備ID,設備名\n"), &ImportOptions::default());
        assert!(!res.success);
        assert_eq!(res.errors.len(), 1);
        assert!(res.errors[0].message.contains("no data rows"));
    }

    #[test]
    fn warnings_do_not_block_success() {
        let res = process_file(
            &csv_file("plan.csv", "設備ID,設備名,費用\nP-1,ポンプ,abc\n,,\n"),
            &ImportOptions::default(),
        );
        assert!(res.success);
        assert_eq!(res.processed_rows, 2);
        assert_eq!(res.errors.len(), 2);
        assert!(!res.suggestions.is_empty());
    }

    #[test]
    fn preview_rekeys_by_mapped_field_and_caps_rows() {
        let mut body = String::from("設備ID,備考\n");
        for i in 0..8 {
            body.push_str(&format!("P-{i},note {i}\n"));
        }
        let file = csv_file("preview.csv", &body);
        let mappings = map_headers(&["設備ID", "備考"]);

        let rows = generate_preview_data(&file, &mappings, &ImportOptions::default());
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0].get("equipment_id").map(String::as_str), Some("P-0"));
        assert_eq!(rows[4].get("備考").map(String::as_str), Some("note 4"));
    }

    #[test]
    fn preview_of_unreadable_file_is_empty() {
        let file = ImportFile::new("broken.xlsx", None, b"not a workbook".to_vec());
        assert!(generate_preview_data(&file, &[], &ImportOptions::default()).is_empty());
    }
}
