//! String similarity scoring used to match raw headers against known synonyms.

use strsim::levenshtein;

/// Weight applied to the length ratio when one string contains the other.
const CONTAINMENT_WEIGHT: f64 = 0.8;
/// Weight applied to the normalized edit-distance similarity.
const EDIT_WEIGHT: f64 = 0.7;
/// Raw edit similarity must exceed this before it contributes at all.
const EDIT_FLOOR: f64 = 0.7;

/// Confidence in `[0, 1]` that `a` and `b` denote the same concept.
///
/// Inputs are expected to be trimmed and lower-cased by the caller. The score is the maximum of:
///
/// - exact equality: `1.0`
/// - containment (either way): `min_len / max_len * 0.8`
/// - edit distance: `(1 - dist / max_len) * 0.7`, only when `1 - dist / max_len > 0.7`
///
/// Lengths are counted in characters, so multi-byte headers score the same as ASCII ones.
/// The function is symmetric: `similarity(a, b) == similarity(b, a)`.
pub fn similarity(a: &str, b: &str) -> f64 {
    if a == b {
        return 1.0;
    }

    let len_a = a.chars().count();
    let len_b = b.chars().count();
    let max_len = len_a.max(len_b);
    if max_len == 0 {
        return 0.0;
    }
    let min_len = len_a.min(len_b);

    let mut score = 0.0_f64;

    if min_len > 0 && (a.contains(b) || b.contains(a)) {
        score = score.max(min_len as f64 / max_len as f64 * CONTAINMENT_WEIGHT);
    }

    let raw = 1.0 - levenshtein(a, b) as f64 / max_len as f64;
    if raw > EDIT_FLOOR {
        score = score.max(raw * EDIT_WEIGHT);
    }

    score
}
