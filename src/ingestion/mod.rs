//! File import: decoding, validation and orchestration.
//!
//! Most callers should use [`process_file`] (from [`unified`]) which:
//!
//! - admits the file by extension / media type and size
//! - decodes it into a [`RawTable`] (header row + body rows)
//! - suggests field mappings for the header row and validates every body row
//! - optionally reports success/failure/alerts to an [`ImportObserver`]
//!
//! Format-specific decoders are also available under:
//! - [`csv`]
//! - `excel` (Cargo feature `excel`)

pub mod csv;
#[cfg(feature = "excel")]
pub mod excel;
pub mod facts;
pub mod observability;
pub mod table;
pub mod unified;
pub mod validation;

pub use facts::{facts_from_table, period_key};
pub use observability::{
    CompositeObserver, FileObserver, ImportContext, ImportObserver, ImportSeverity, ImportStats, StdErrObserver,
};
pub use table::{ImportFile, ImportFormat, RawTable};
pub use unified::{
    decode_file, generate_preview_data, process_file, ImportOptions, PreviewRow, SheetSelection,
    DEFAULT_MAX_FILE_SIZE, DEFAULT_PREVIEW_ROWS,
};
pub use validation::{validate_rows, ColumnClass};
