//! Row validation.
//!
//! Columns are classified from their header text alone (independent of the field mapper's
//! output):
//!
//! - **required**: the header approximately matches the equipment id or equipment name concept
//! - **date-bearing**: the header contains date/period vocabulary
//! - **numeric-bearing**: the header contains cost/cycle vocabulary
//!
//! Checks are additive: a cell may produce zero, one or two issues. Row numbers are the
//! 1-based data-row position + 1, since the header occupies logical row 1.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;

use crate::mapping::{field_confidence, CanonicalField};
use crate::types::ImportIssue;

/// Minimum similarity against an identity concept for a header to count as required.
pub const REQUIRED_MATCH_THRESHOLD: f64 = 0.8;

const REQUIRED_FIELDS: [CanonicalField; 2] = [CanonicalField::EquipmentId, CanonicalField::EquipmentName];

const DATE_KEYWORDS: &[&str] = &[
    "date", "day", "period", "month", "日付", "日", "年月", "期間", "時期",
];

const NUMERIC_KEYWORDS: &[&str] = &[
    "cost", "price", "amount", "cycle", "interval", "費用", "金額", "コスト", "価格", "周期", "回数",
];

const CURRENCY_SYMBOLS: &[char] = &['¥', '￥', '$', '€', '£', '円', ','];

static DATE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"^\d{4}-\d{1,2}-\d{1,2}$",
        r"^\d{4}/\d{1,2}/\d{1,2}$",
        r"^\d{1,2}-\d{1,2}-\d{4}$",
        r"^\d{4}年\d{1,2}月\d{1,2}日$",
        r"^\d{4}年\d{1,2}月$",
    ]
    .iter()
    .filter_map(|p| Regex::new(p).ok())
    .collect()
});

/// How a column is checked, derived from its header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnClass {
    /// Empty cells are errors.
    pub required: bool,
    /// Non-empty cells should look like dates.
    pub date: bool,
    /// Non-empty cells should look like numbers.
    pub numeric: bool,
}

impl ColumnClass {
    /// Classify a header label.
    pub fn of(header: &str) -> Self {
        let normalized = header.trim().to_lowercase();
        if normalized.is_empty() {
            return Self::default();
        }
        Self {
            required: REQUIRED_FIELDS
                .iter()
                .any(|f| field_confidence(&normalized, *f) >= REQUIRED_MATCH_THRESHOLD),
            date: DATE_KEYWORDS.iter().any(|k| normalized.contains(k)),
            numeric: NUMERIC_KEYWORDS.iter().any(|k| normalized.contains(k)),
        }
    }
}

/// Validate body rows against the header row.
pub fn validate_rows<H, R, C>(headers: &[H], rows: &[R]) -> Vec<ImportIssue>
where
    H: AsRef<str>,
    R: AsRef<[C]>,
    C: AsRef<str>,
{
    let classes: Vec<ColumnClass> = headers.iter().map(|h| ColumnClass::of(h.as_ref())).collect();

    let mut issues = Vec::new();
    for (idx0, row) in rows.iter().enumerate() {
        let user_row = idx0 + 2;
        let cells = row.as_ref();

        if cells.iter().all(|c| c.as_ref().trim().is_empty()) {
            issues.push(ImportIssue::warning(user_row, "all", "empty row"));
            continue;
        }

        for (col, (header, class)) in headers.iter().zip(&classes).enumerate() {
            let header = header.as_ref();
            let value = cells.get(col).map(|c| c.as_ref().trim()).unwrap_or("");

            if value.is_empty() {
                if class.required {
                    issues.push(ImportIssue::error(
                        user_row,
                        header,
                        format!("required value '{header}' is empty"),
                    ));
                }
                continue;
            }

            if class.date && !looks_like_date(value) {
                issues.push(ImportIssue::warning(
                    user_row,
                    header,
                    format!("'{value}' is not a recognized date"),
                ));
            }
            if class.numeric && !looks_like_number(value) {
                issues.push(ImportIssue::warning(
                    user_row,
                    header,
                    format!("'{value}' is not a number"),
                ));
            }
        }
    }
    issues
}

/// Whether `value` matches one of the accepted date shapes or a generic date/time format.
pub fn looks_like_date(value: &str) -> bool {
    let value = value.trim();
    DATE_PATTERNS.iter().any(|re| re.is_match(value)) || parse_generic_date(value).is_some()
}

/// Generic fallback parse for date-like text.
pub fn parse_generic_date(value: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(value) {
        return Some(dt.date_naive());
    }
    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y/%m/%d %H:%M:%S", "%Y/%m/%d %H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, fmt) {
            return Some(dt.date());
        }
    }
    for fmt in ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d.%m.%Y", "%b %d %Y", "%B %d, %Y", "%d %b %Y"] {
        if let Ok(d) = NaiveDate::parse_from_str(value, fmt) {
            return Some(d);
        }
    }
    None
}

/// Whether `value` parses as a number after removing thousands separators and currency marks.
pub fn looks_like_number(value: &str) -> bool {
    parse_amount(value).is_some()
}

/// Parse an amount such as `"¥80,000"` or `"1,200円"`.
pub fn parse_amount(value: &str) -> Option<f64> {
    let cleaned: String = value
        .chars()
        .filter(|c| !CURRENCY_SYMBOLS.contains(c) && !c.is_whitespace())
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|n| n.is_finite())
}
