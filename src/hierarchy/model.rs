//! Equipment tree data model.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Opaque period bucket key (e.g. `"2024-05"`). Compared by exact string equality.
pub type TimeKey = String;

/// Planned/actual status and cost for one period.
///
/// A missing entry is equivalent to [`PeriodResult::default`] (all false / zero).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodResult {
    pub planned: bool,
    pub actual: bool,
    pub plan_cost: f64,
    pub actual_cost: f64,
}

impl PeriodResult {
    /// Combine two results: flags are OR-ed, costs are summed.
    pub fn merge(self, other: PeriodResult) -> PeriodResult {
        PeriodResult {
            planned: self.planned || other.planned,
            actual: self.actual || other.actual,
            plan_cost: self.plan_cost + other.plan_cost,
            actual_cost: self.actual_cost + other.actual_cost,
        }
    }

    /// Whether the period is already planned or carried out.
    pub fn is_serviced(&self) -> bool {
        self.planned || self.actual
    }
}

/// One key/value line of an equipment specification sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Specification {
    pub key: String,
    pub value: String,
    pub order: u32,
}

impl Specification {
    pub fn new(key: impl Into<String>, value: impl Into<String>, order: u32) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            order,
        }
    }
}

/// A unit of the equipment hierarchy (plant, line, unit, machine...).
///
/// Leaves carry their own `results`; nodes with children additionally carry
/// `rolled_up_results`, recomputed by [`crate::hierarchy::aggregate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentNode {
    /// Primary key.
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternate_code: Option<String>,
    pub display_name: String,
    #[serde(default)]
    pub specifications: Vec<Specification>,
    #[serde(default)]
    pub children: Vec<EquipmentNode>,
    #[serde(default)]
    pub results: BTreeMap<TimeKey, PeriodResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rolled_up_results: Option<BTreeMap<TimeKey, PeriodResult>>,
}

impl EquipmentNode {
    /// Create a leaf node with no specifications or results.
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            alternate_code: None,
            display_name: display_name.into(),
            specifications: Vec::new(),
            children: Vec::new(),
            results: BTreeMap::new(),
            rolled_up_results: None,
        }
    }

    pub fn with_alternate_code(mut self, code: impl Into<String>) -> Self {
        self.alternate_code = Some(code.into());
        self
    }

    pub fn with_children(mut self, children: Vec<EquipmentNode>) -> Self {
        self.children = children;
        self
    }

    pub fn with_result(mut self, key: impl Into<TimeKey>, result: PeriodResult) -> Self {
        self.results.insert(key.into(), result);
        self
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Own result for `key`, defaulting to all-false/zero.
    pub fn result(&self, key: &str) -> PeriodResult {
        self.results.get(key).copied().unwrap_or_default()
    }

    /// Rolled-up result for `key`, defaulting to all-false/zero.
    pub fn rolled_up(&self, key: &str) -> PeriodResult {
        self.rolled_up_results
            .as_ref()
            .and_then(|m| m.get(key))
            .copied()
            .unwrap_or_default()
    }

    /// What this node contributes to its parent's rollup for `key`:
    /// its own result merged with its rolled-up result.
    pub fn contribution(&self, key: &str) -> PeriodResult {
        self.result(key).merge(self.rolled_up(key))
    }
}

/// What a [`MaintenanceFact`] records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FactAction {
    /// Maintenance is planned for the period.
    Plan,
    /// Maintenance was carried out in the period.
    Actual,
    /// Planned and carried out.
    Both,
}

/// A proposed or confirmed maintenance event for one equipment and period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceFact {
    pub equipment_id: String,
    pub time_header: TimeKey,
    pub action: FactAction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
    /// Confidence in `[0, 1]`.
    pub confidence: f64,
    pub reason: String,
}

impl MaintenanceFact {
    pub fn new(equipment_id: impl Into<String>, time_header: impl Into<TimeKey>, action: FactAction) -> Self {
        Self {
            equipment_id: equipment_id.into(),
            time_header: time_header.into(),
            action,
            cost: None,
            confidence: 1.0,
            reason: String::new(),
        }
    }

    pub fn with_cost(mut self, cost: f64) -> Self {
        self.cost = Some(cost);
        self
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence.clamp(0.0, 1.0);
        self
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = reason.into();
        self
    }
}
