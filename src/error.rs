use thiserror::Error;

/// Convenience result type for file and tree decoding operations.
pub type DecodeResult<T> = Result<T, ImportError>;

/// Error type returned by the decoding layer.
///
/// These never escape [`crate::ingestion::process_file`]; the orchestrator converts each one into
/// a single file-level [`crate::types::ImportIssue`].
#[derive(Debug, Error)]
pub enum ImportError {
    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "excel")]
    /// Excel decoding error (feature-gated behind `excel`).
    #[error("excel error: {0}")]
    Excel(#[from] calamine::Error),

    /// CSV decoding error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// Equipment tree JSON could not be parsed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Neither the file extension nor the declared media type is an accepted format.
    #[error("unsupported file format: '{name}' (accepted: .xlsx, .xls, .csv)")]
    UnsupportedFormat { name: String },

    /// The file exceeds the configured size ceiling.
    #[error("file too large: {size} bytes (limit {limit} bytes)")]
    FileTooLarge { size: u64, limit: u64 },

    /// No readable sheet/table was found in the file.
    #[error("no readable sheet: {message}")]
    NoSheet { message: String },

    /// The file has a header row but no data rows.
    #[error("no data rows found after the header row")]
    NoDataRows,

    /// Any other failure while decoding the raw bytes.
    #[error("decode failed: {message}")]
    Decode { message: String },
}

impl ImportError {
    /// Whether this error is an admission failure (rejected before or instead of decoding).
    pub fn is_admission(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedFormat { .. } | Self::FileTooLarge { .. } | Self::NoSheet { .. } | Self::NoDataRows
        )
    }
}
