//! `maintenance-import` ingests equipment/maintenance spreadsheets of unknown column layout and
//! folds maintenance facts into an equipment hierarchy with bottom-up rollups.
//!
//! The crate has two entry points:
//!
//! - [`ingestion::process_file`]: admit and decode an uploaded file, suggest a mapping from its
//!   headers to [`mapping::CanonicalField`]s, and validate every row into an
//!   [`types::ImportResult`]
//! - [`hierarchy::apply_fact`]: apply a [`hierarchy::MaintenanceFact`] to an equipment tree and
//!   recompute every ancestor's planned/actual/cost rollup
//!
//! ## What you can import
//!
//! - **CSV**: `.csv` (`text/csv`)
//! - **Excel workbooks** (Cargo feature `excel`, on by default): `.xlsx`, `.xls`
//!
//! Files over 10 MiB, of another type, without a header row, or without data rows are rejected
//! with a single file-level issue. Nothing in the pipeline panics or returns `Err` to the caller:
//! problems are reported as [`types::ImportIssue`]s.
//!
//! ## Quick example: import
//!
//! ```rust
//! use maintenance_import::ingestion::{process_file, ImportFile, ImportOptions};
//! use maintenance_import::mapping::CanonicalField;
//!
//! let csv = "設備ID,設備名,保全周期,費用\nP-1,ポンプA-1,12,\"¥80,000\"\n";
//! let file = ImportFile::new("plan.csv", None, csv.as_bytes().to_vec());
//!
//! let result = process_file(&file, &ImportOptions::default());
//! assert!(result.success);
//! assert_eq!(result.processed_rows, 1);
//! assert_eq!(result.suggestions[0].target_field, CanonicalField::EquipmentId);
//! ```
//!
//! ## Quick example: apply a fact
//!
//! ```rust
//! use maintenance_import::hierarchy::{apply_fact, find_similar_facts, EquipmentNode, FactAction, MaintenanceFact, PeriodResult};
//!
//! let tree = vec![EquipmentNode::new("U-1", "Unit 1").with_children(vec![
//!     EquipmentNode::new("P-1", "Pump A-1")
//!         .with_result("2024-05", PeriodResult::default())
//!         .with_result("2024-06", PeriodResult::default()),
//! ])];
//!
//! let fact = MaintenanceFact::new("P-1", "2024-06", FactAction::Plan).with_cost(1200.0);
//! let tree = apply_fact(&tree, &fact).tree.unwrap();
//! assert_eq!(tree[0].rolled_up("2024-06").plan_cost, 1200.0);
//!
//! // 2024-05 is still open, so the same plan is proposed there at lower confidence.
//! let similar = find_similar_facts(&fact, &tree);
//! assert_eq!(similar.len(), 1);
//! assert_eq!(similar[0].time_header, "2024-05");
//! ```
//!
//! ## Modules
//!
//! - [`ingestion`]: admission, decoding, validation, import orchestration, row → fact conversion
//! - [`mapping`]: similarity scoring and the canonical field dictionary
//! - [`hierarchy`]: equipment tree model, lookup, mutation, rollup and suggestion expansion
//! - [`types`]: import result types
//! - [`error`]: decode error type

pub mod error;
pub mod hierarchy;
pub mod ingestion;
pub mod mapping;
pub mod types;

pub use error::{DecodeResult, ImportError};
pub use types::{FieldMapping, ImportIssue, ImportResult, IssueSeverity};
