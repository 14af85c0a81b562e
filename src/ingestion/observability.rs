//! Import observers: where `process_file` reports accepted and rejected uploads.
//!
//! Two sinks ship with the crate: [`StdErrObserver`] prints one human-readable line per event,
//! [`FileObserver`] appends one JSON object per line to a log file. [`CompositeObserver`] feeds
//! several sinks at once.

use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::json;

use crate::error::ImportError;

use super::table::{ImportFile, ImportFormat};

/// Severity classification used for observer callbacks and alerting thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ImportSeverity {
    Info,
    /// Non-fatal.
    Warning,
    /// The file was rejected or could not be decoded.
    Error,
    /// The upload could not even be read (I/O).
    Critical,
}

/// Which upload an event is about.
#[derive(Debug, Clone)]
pub struct ImportContext {
    /// File name as supplied by the uploader.
    pub file_name: String,
    /// Detected format, once detection succeeded.
    pub format: Option<ImportFormat>,
    /// Size of the upload in bytes.
    pub size: u64,
}

impl ImportContext {
    /// Context for `file` before its format is known.
    pub fn for_file(file: &ImportFile) -> Self {
        Self {
            file_name: file.name.clone(),
            format: None,
            size: file.size(),
        }
    }

    fn format_label(&self) -> &'static str {
        match self.format {
            Some(ImportFormat::Csv) => "csv",
            Some(ImportFormat::Excel) => "excel",
            None => "unknown",
        }
    }
}

impl fmt::Display for ImportContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' ({}, {} bytes)", self.file_name, self.format_label(), self.size)
    }
}

/// Row-level outcome of a decoded upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportStats {
    /// Number of data rows.
    pub rows: usize,
    /// Error-severity row issues.
    pub errors: usize,
    /// Warning-severity row issues.
    pub warnings: usize,
    /// Number of field mapping suggestions.
    pub mappings: usize,
}

impl ImportStats {
    /// Whether the rows can be imported as-is (warnings allowed).
    pub fn is_importable(&self) -> bool {
        self.errors == 0
    }
}

/// Receives the outcome of every `process_file` call.
pub trait ImportObserver: Send + Sync {
    /// The file was decoded and validated. Row issues may still block the import; see
    /// [`ImportStats::is_importable`].
    fn on_success(&self, _ctx: &ImportContext, _stats: ImportStats) {}

    /// The file was rejected at admission or could not be decoded.
    fn on_failure(&self, _ctx: &ImportContext, _severity: ImportSeverity, _error: &ImportError) {}

    /// A failure at or above `ImportOptions::alert_at_or_above`. Forwards to
    /// [`Self::on_failure`] unless overridden.
    fn on_alert(&self, ctx: &ImportContext, severity: ImportSeverity, error: &ImportError) {
        self.on_failure(ctx, severity, error)
    }
}

/// Forwards every event to each of its observers, in order.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn ImportObserver>>,
}

impl CompositeObserver {
    pub fn new(observers: Vec<Arc<dyn ImportObserver>>) -> Self {
        Self { observers }
    }

    /// Add one more observer.
    pub fn with(mut self, observer: Arc<dyn ImportObserver>) -> Self {
        self.observers.push(observer);
        self
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl ImportObserver for CompositeObserver {
    fn on_success(&self, ctx: &ImportContext, stats: ImportStats) {
        self.observers.iter().for_each(|o| o.on_success(ctx, stats));
    }

    fn on_failure(&self, ctx: &ImportContext, severity: ImportSeverity, error: &ImportError) {
        self.observers.iter().for_each(|o| o.on_failure(ctx, severity, error));
    }

    fn on_alert(&self, ctx: &ImportContext, severity: ImportSeverity, error: &ImportError) {
        self.observers.iter().for_each(|o| o.on_alert(ctx, severity, error));
    }
}

/// Prints one line per event to stderr.
#[derive(Debug, Default)]
pub struct StdErrObserver;

impl ImportObserver for StdErrObserver {
    fn on_success(&self, ctx: &ImportContext, stats: ImportStats) {
        let verdict = if stats.is_importable() { "accepted" } else { "needs fixes" };
        eprintln!(
            "[import] {ctx} {verdict}: {} rows, {} errors, {} warnings, {} mapped columns",
            stats.rows, stats.errors, stats.warnings, stats.mappings
        );
    }

    fn on_failure(&self, ctx: &ImportContext, severity: ImportSeverity, error: &ImportError) {
        eprintln!("[import] {ctx} rejected ({severity:?}): {error}");
    }

    fn on_alert(&self, ctx: &ImportContext, severity: ImportSeverity, error: &ImportError) {
        eprintln!("[import][ALERT] {ctx} rejected ({severity:?}): {error}");
    }
}

/// Appends events to a log file as JSON lines.
///
/// Each line has `ts` (unix seconds), `event` (`accepted`, `failed` or `alert`), `file`,
/// `format`, `size`, then either the row stats or `severity` and `error`.
#[derive(Debug)]
pub struct FileObserver {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileObserver {
    /// Writes are best-effort: a log file that cannot be opened or written is skipped.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    fn append(&self, record: serde_json::Value) {
        let _guard = self.lock.lock().ok();
        if let Ok(mut f) = OpenOptions::new().create(true).append(true).open(&self.path) {
            let _ = writeln!(f, "{record}");
        }
    }

    fn failure_record(event: &str, ctx: &ImportContext, severity: ImportSeverity, error: &ImportError) -> serde_json::Value {
        json!({
            "ts": unix_ts(),
            "event": event,
            "file": ctx.file_name,
            "format": ctx.format_label(),
            "size": ctx.size,
            "severity": format!("{severity:?}").to_lowercase(),
            "error": error.to_string(),
        })
    }
}

impl ImportObserver for FileObserver {
    fn on_success(&self, ctx: &ImportContext, stats: ImportStats) {
        self.append(json!({
            "ts": unix_ts(),
            "event": "accepted",
            "file": ctx.file_name,
            "format": ctx.format_label(),
            "size": ctx.size,
            "rows": stats.rows,
            "errors": stats.errors,
            "warnings": stats.warnings,
            "mappings": stats.mappings,
        }));
    }

    fn on_failure(&self, ctx: &ImportContext, severity: ImportSeverity, error: &ImportError) {
        self.append(Self::failure_record("failed", ctx, severity, error));
    }

    fn on_alert(&self, ctx: &ImportContext, severity: ImportSeverity, error: &ImportError) {
        self.append(Self::failure_record("alert", ctx, severity, error));
    }
}

fn unix_ts() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_secs())
}

#[cfg(test)]
mod tests {
    use super::{FileObserver, ImportContext, ImportObserver, ImportSeverity, ImportStats};
    use crate::error::ImportError;
    use crate::ingestion::ImportFormat;

    fn ctx() -> ImportContext {
        ImportContext {
            file_name: "plan.csv".to_string(),
            format: Some(ImportFormat::Csv),
            size: 42,
        }
    }

    #[test]
    fn context_displays_file_format_and_size() {
        assert_eq!(ctx().to_string(), "'plan.csv' (csv, 42 bytes)");
    }

    #[test]
    fn file_observer_writes_one_json_object_per_event() {
        let path = std::env::temp_dir().join(format!("maintenance_import_obs_{}.log", std::process::id()));
        let _ = std::fs::remove_file(&path);

        let obs = FileObserver::new(&path);
        let stats = ImportStats {
            rows: 3,
            errors: 1,
            warnings: 2,
            mappings: 4,
        };
        obs.on_success(&ctx(), stats);
        obs.on_alert(&ctx(), ImportSeverity::Error, &ImportError::NoDataRows);

        let text = std::fs::read_to_string(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        let lines: Vec<serde_json::Value> = text.lines().map(|l| serde_json::from_str(l).unwrap()).collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["event"], "accepted");
        assert_eq!(lines[0]["rows"], 3);
        assert_eq!(lines[0]["format"], "csv");
        assert_eq!(lines[1]["event"], "alert");
        assert_eq!(lines[1]["severity"], "error");
        assert_eq!(lines[1]["error"], "no data rows found after the header row");
    }
}
