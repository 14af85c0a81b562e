//! Input file and decoded table types.

use std::fs;
use std::path::Path;

use crate::error::{DecodeResult, ImportError};

/// Supported upload formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportFormat {
    /// Comma-separated values.
    Csv,
    /// Spreadsheet workbook (`.xlsx`, `.xls`; feature-gated behind `excel`).
    Excel,
}

impl ImportFormat {
    /// Parse a format from a file extension (case-insensitive, without the dot).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "xlsx" | "xls" => Some(Self::Excel),
            _ => None,
        }
    }

    /// Parse a format from a declared media type.
    pub fn from_media_type(media_type: &str) -> Option<Self> {
        let essence = media_type.split(';').next().unwrap_or("").trim().to_ascii_lowercase();
        match essence.as_str() {
            "text/csv" | "application/csv" => Some(Self::Csv),
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            | "application/vnd.ms-excel" => Some(Self::Excel),
            _ => None,
        }
    }
}

/// An uploaded file: a name, an optional declared media type, and its raw bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportFile {
    /// File name as supplied by the uploader (used for extension detection).
    pub name: String,
    /// Declared media type, if the uploader provided one.
    pub media_type: Option<String>,
    /// Raw content.
    pub bytes: Vec<u8>,
}

impl ImportFile {
    /// Create a file from in-memory content.
    pub fn new(name: impl Into<String>, media_type: Option<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            media_type,
            bytes,
        }
    }

    /// Read a file from disk. The name is the final path component.
    pub fn from_path(path: impl AsRef<Path>) -> DecodeResult<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path)?;
        let name = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string();
        Ok(Self::new(name, None, bytes))
    }

    /// Size in bytes.
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Lower-cased extension of `name`, if any.
    pub fn extension(&self) -> Option<String> {
        Path::new(&self.name)
            .extension()
            .and_then(|s| s.to_str())
            .map(str::to_ascii_lowercase)
    }

    /// Detect the format from the extension, then from the declared media type.
    pub fn detect_format(&self) -> DecodeResult<ImportFormat> {
        self.extension()
            .and_then(|ext| ImportFormat::from_extension(&ext))
            .or_else(|| self.media_type.as_deref().and_then(ImportFormat::from_media_type))
            .ok_or_else(|| ImportError::UnsupportedFormat {
                name: self.name.clone(),
            })
    }
}

/// A decoded table: header row plus body rows of raw cell text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTable {
    /// Sheet the table was read from (workbooks only).
    pub sheet: Option<String>,
    /// Header labels, in column order.
    pub headers: Vec<String>,
    /// Body rows, in file order. Rows may be shorter or longer than `headers`.
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Create a table.
    pub fn new(sheet: Option<String>, headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { sheet, headers, rows }
    }

    /// Number of body rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Cell text at (`row`, `col`), or `""` when the row is short.
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
            .unwrap_or("")
    }
}
