//! Turning accepted import rows into maintenance facts.

use std::sync::LazyLock;

use regex::Regex;

use crate::hierarchy::{FactAction, MaintenanceFact, TimeKey};
use crate::mapping::{best_mappings, CanonicalField};
use crate::types::{FieldMapping, ImportIssue};

use super::table::RawTable;
use super::validation::{parse_amount, parse_generic_date};

static YEAR_MONTH: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^(\d{4})\s*[-/年.]\s*(\d{1,2})").ok());
static MONTH_DAY_YEAR: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^(\d{1,2})-(\d{1,2})-(\d{4})$").ok());

const TRUTHY: &[&str] = &[
    "true", "yes", "y", "1", "x", "○", "◯", "●", "✓", "✔", "済", "有", "あり",
];
const DONE_STATUS: &[&str] = &["done", "completed", "complete", "完了", "実施済", "済"];
const PLANNED_STATUS: &[&str] = &["planned", "scheduled", "予定", "計画", "未実施"];

/// Normalize a date-like cell to a `YYYY-MM` period key; unparseable text is kept as-is.
pub fn period_key(value: &str) -> TimeKey {
    let value = value.trim();
    if let Some(caps) = YEAR_MONTH.as_ref().and_then(|re| re.captures(value)) {
        if let (Ok(y), Ok(m)) = (caps[1].parse::<u32>(), caps[2].parse::<u32>()) {
            if (1..=12).contains(&m) {
                return format!("{y:04}-{m:02}");
            }
        }
    }
    if let Some(caps) = MONTH_DAY_YEAR.as_ref().and_then(|re| re.captures(value)) {
        if let (Ok(m), Ok(y)) = (caps[1].parse::<u32>(), caps[3].parse::<u32>()) {
            if (1..=12).contains(&m) {
                return format!("{y:04}-{m:02}");
            }
        }
    }
    match parse_generic_date(value) {
        Some(d) => d.format("%Y-%m").to_string(),
        None => value.to_string(),
    }
}

fn is_truthy(value: &str) -> bool {
    let v = value.trim().to_lowercase();
    TRUTHY.contains(&v.as_str())
}

fn status_action(value: &str) -> (bool, bool) {
    let v = value.trim().to_lowercase();
    (
        PLANNED_STATUS.contains(&v.as_str()),
        DONE_STATUS.contains(&v.as_str()),
    )
}

/// Build one [`MaintenanceFact`] per data row that names equipment, a period and an action.
///
/// Columns are resolved with [`best_mappings`]. The action comes from truthy `planned` /
/// `actual` cells (or a recognizable `status`), the period from the `date` column normalized to
/// `YYYY-MM`, and the cost from `maintenance_cost`. Rows with an action but no equipment id, no
/// period, or a negative cost produce a warning; rows without any action are skipped.
pub fn facts_from_table(table: &RawTable, mappings: &[FieldMapping]) -> (Vec<MaintenanceFact>, Vec<ImportIssue>) {
    let resolved = best_mappings(mappings);
    let column_of = |field: CanonicalField| -> Option<usize> {
        let source = &resolved.iter().find(|m| m.target_field == field)?.source_column;
        table.headers.iter().position(|h| h.trim() == source.as_str())
    };

    let id_col = column_of(CanonicalField::EquipmentId);
    let date_col = column_of(CanonicalField::Date);
    let planned_col = column_of(CanonicalField::Planned);
    let actual_col = column_of(CanonicalField::Actual);
    let status_col = column_of(CanonicalField::Status);
    let cost_col = column_of(CanonicalField::MaintenanceCost);

    let cell = |row: usize, col: Option<usize>| col.map(|c| table.cell(row, c).trim()).unwrap_or("");

    let mut facts = Vec::new();
    let mut issues = Vec::new();
    for row in 0..table.row_count() {
        let user_row = row + 2;
        let (status_planned, status_done) = status_action(cell(row, status_col));
        let planned = is_truthy(cell(row, planned_col)) || status_planned;
        let actual = is_truthy(cell(row, actual_col)) || status_done;

        let action = match (planned, actual) {
            (true, true) => FactAction::Both,
            (true, false) => FactAction::Plan,
            (false, true) => FactAction::Actual,
            (false, false) => continue,
        };

        let equipment_id = cell(row, id_col);
        if equipment_id.is_empty() {
            issues.push(ImportIssue::warning(user_row, "all", "no equipment id; row not converted"));
            continue;
        }
        let date = cell(row, date_col);
        if date.is_empty() {
            issues.push(ImportIssue::warning(user_row, "all", "no maintenance period; row not converted"));
            continue;
        }

        let cost = parse_amount(cell(row, cost_col));
        if let Some(amount) = cost.filter(|a| *a < 0.0) {
            let column = cost_col.map_or("all", |c| table.headers[c].as_str());
            issues.push(ImportIssue::warning(
                user_row,
                column,
                format!("negative cost {amount}; row not converted"),
            ));
            continue;
        }

        let mut fact = MaintenanceFact::new(equipment_id, period_key(date), action)
            .with_reason(format!("imported from row {user_row}"));
        if let Some(cost) = cost {
            fact = fact.with_cost(cost);
        }
        facts.push(fact);
    }

    (facts, issues)
}
