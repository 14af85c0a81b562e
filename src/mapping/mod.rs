//! Header-to-field mapping.
//!
//! - [`similarity()`]: pure 0..1 string similarity (exact / containment / edit distance)
//! - [`CanonicalField`]: the fixed field dictionary and its synonyms
//! - [`map_headers`]: ranked column → field suggestions for a header row
//!
//! ```rust
//! use maintenance_import::mapping::{map_headers, CanonicalField};
//!
//! let suggestions = map_headers(&["設備ID", "Equipment Name", "費用"]);
//! let id = suggestions.iter().find(|m| m.source_column == "設備ID").unwrap();
//! assert_eq!(id.target_field, CanonicalField::EquipmentId);
//! assert_eq!(id.confidence, 1.0);
//! ```

pub mod dictionary;
pub mod mapper;
pub mod similarity;

pub use dictionary::{CanonicalField, UnknownField, DICTIONARY_VERSION};
pub use mapper::{best_mappings, field_confidence, map_header, map_headers, MAPPING_THRESHOLD};
pub use similarity::similarity;
