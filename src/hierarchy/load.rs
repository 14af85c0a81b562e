//! Loading equipment trees from JSON.

use std::path::Path;

use serde_json::Value;

use crate::error::{DecodeResult, ImportError};

use super::model::EquipmentNode;

/// Parse a tree from JSON text.
///
/// Accepts either an array of root nodes or a single root object. Stored `rolledUpResults` are
/// kept as-is; run [`crate::hierarchy::aggregate`] before relying on them.
pub fn tree_from_json(json: &str) -> DecodeResult<Vec<EquipmentNode>> {
    let value: Value = serde_json::from_str(json.trim_start_matches('\u{feff}'))?;
    match value {
        Value::Array(_) => Ok(serde_json::from_value(value)?),
        Value::Object(_) => Ok(vec![serde_json::from_value(value)?]),
        other => Err(ImportError::Decode {
            message: format!("expected an equipment node or an array of nodes, got {other}"),
        }),
    }
}

/// Read and parse a tree file; see [`tree_from_json`].
pub fn tree_from_path(path: impl AsRef<Path>) -> DecodeResult<Vec<EquipmentNode>> {
    let text = std::fs::read_to_string(path)?;
    tree_from_json(&text)
}
