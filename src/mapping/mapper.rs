//! Header row → canonical field suggestions.

use std::collections::HashSet;

use crate::types::FieldMapping;

use super::dictionary::CanonicalField;
use super::similarity::similarity;

/// Minimum confidence (exclusive) for a suggestion to be emitted.
pub const MAPPING_THRESHOLD: f64 = 0.6;

/// Best similarity between a normalized header and any synonym of `field`.
pub fn field_confidence(normalized_header: &str, field: CanonicalField) -> f64 {
    field
        .synonyms()
        .iter()
        .map(|syn| similarity(normalized_header, syn))
        .fold(0.0, f64::max)
}

/// Suggestions for a single header, in dictionary order.
///
/// Empty/whitespace headers yield nothing.
pub fn map_header(header: &str) -> Vec<FieldMapping> {
    let label = header.trim();
    if label.is_empty() {
        return Vec::new();
    }
    let normalized = label.to_lowercase();

    CanonicalField::ALL
        .into_iter()
        .filter_map(|field| {
            let confidence = field_confidence(&normalized, field);
            (confidence > MAPPING_THRESHOLD).then(|| FieldMapping {
                source_column: label.to_string(),
                target_field: field,
                confidence,
            })
        })
        .collect()
}

/// Suggest mappings for a whole header row.
///
/// Every header is scored against every canonical field; a header may produce several
/// suggestions when more than one field crosses the threshold. The result is sorted by
/// descending confidence, ties keeping header order. Exclusivity is left to the caller
/// (see [`best_mappings`]).
pub fn map_headers<S: AsRef<str>>(headers: &[S]) -> Vec<FieldMapping> {
    let mut out: Vec<FieldMapping> = headers.iter().flat_map(|h| map_header(h.as_ref())).collect();
    // `sort_by` is stable, which keeps header order for equal confidence.
    out.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
    out
}

/// Resolve a ranked suggestion list into at most one mapping per field and per column.
///
/// Walks the list in order (highest confidence first) and keeps a suggestion only if neither
/// its target field nor its source column has already been claimed.
pub fn best_mappings(mappings: &[FieldMapping]) -> Vec<FieldMapping> {
    let mut fields: HashSet<CanonicalField> = HashSet::new();
    let mut columns: HashSet<&str> = HashSet::new();
    let mut ranked: Vec<&FieldMapping> = mappings.iter().collect();
    ranked.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));

    ranked
        .into_iter()
        .filter(|m| {
            if fields.contains(&m.target_field) || columns.contains(m.source_column.as_str()) {
                return false;
            }
            fields.insert(m.target_field);
            columns.insert(m.source_column.as_str());
            true
        })
        .cloned()
        .collect()
}
