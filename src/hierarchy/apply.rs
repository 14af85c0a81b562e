//! Tree-level entry points: apply one fact, or fold a batch of facts.

use serde::Serialize;

use super::locate::find_node;
use super::model::{EquipmentNode, MaintenanceFact};
use super::mutate::{apply_to_node, replace_node};
use super::rollup::aggregate_owned;

/// Result of [`apply_fact`].
///
/// On failure `tree` is `None` and the caller keeps its current tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApplyOutcome {
    pub success: bool,
    pub message: String,
    pub tree: Option<Vec<EquipmentNode>>,
}

impl ApplyOutcome {
    fn failed(message: String) -> Self {
        Self {
            success: false,
            message,
            tree: None,
        }
    }

    fn not_found(equipment_id: &str) -> Self {
        Self::failed(format!("equipment '{equipment_id}' not found"))
    }
}

/// Apply `fact` to the node it references and return the re-aggregated tree.
///
/// The input tree is never modified. The node is located by id, alternate code, or partial
/// name (see [`crate::hierarchy::find_node`]); if none matches, or the cost is negative or not
/// finite, the outcome is a failure.
pub fn apply_fact(roots: &[EquipmentNode], fact: &MaintenanceFact) -> ApplyOutcome {
    if let Some(cost) = fact.cost.filter(|c| !(c.is_finite() && *c >= 0.0)) {
        return ApplyOutcome::failed(format!(
            "invalid cost {cost} for '{}': costs must be finite and non-negative",
            fact.equipment_id
        ));
    }
    let Some(node) = find_node(roots, &fact.equipment_id) else {
        return ApplyOutcome::not_found(&fact.equipment_id);
    };

    let updated = apply_to_node(node, fact);
    let id = updated.id.clone();
    let name = updated.display_name.clone();
    let Some(spliced) = replace_node(roots, &id, updated) else {
        return ApplyOutcome::not_found(&fact.equipment_id);
    };

    ApplyOutcome {
        success: true,
        message: format!("applied {:?} for {} ({}) at {}", fact.action, name, id, fact.time_header),
        tree: Some(aggregate_owned(spliced)),
    }
}

/// A fact from a batch that could not be applied.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchFailure {
    /// Position of the fact in the batch.
    pub index: usize,
    pub message: String,
}

/// Result of [`apply_facts`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchOutcome {
    /// Tree after every applicable fact (the input tree when nothing applied).
    pub tree: Vec<EquipmentNode>,
    /// Number of facts applied.
    pub applied: usize,
    pub failures: Vec<BatchFailure>,
}

/// Apply `facts` in order, each against the tree produced by the previous one.
///
/// Facts that fail are recorded and skipped; the batch continues.
pub fn apply_facts(roots: &[EquipmentNode], facts: &[MaintenanceFact]) -> BatchOutcome {
    let mut tree = roots.to_vec();
    let mut applied = 0;
    let mut failures = Vec::new();

    for (index, fact) in facts.iter().enumerate() {
        let outcome = apply_fact(&tree, fact);
        match outcome.tree {
            Some(next) if outcome.success => {
                tree = next;
                applied += 1;
            }
            _ => failures.push(BatchFailure {
                index,
                message: outcome.message,
            }),
        }
    }

    BatchOutcome {
        tree,
        applied,
        failures,
    }
}

#[cfg(test)]
mod tests {
    use super::{apply_fact, apply_facts};
    use crate::hierarchy::{EquipmentNode, FactAction, MaintenanceFact};

    fn tree() -> Vec<EquipmentNode> {
        vec![EquipmentNode::new("PL-1", "Plant").with_children(vec![
            EquipmentNode::new("U-1", "Unit 1").with_children(vec![
                EquipmentNode::new("P-1", "Pump A-1"),
                EquipmentNode::new("P-2", "Pump A-2"),
            ]),
        ])]
    }

    #[test]
    fn unknown_equipment_fails_without_tree() {
        let fact = MaintenanceFact::new("X-9", "2024-06", FactAction::Plan);
        let out = apply_fact(&tree(), &fact);
        assert!(!out.success);
        assert!(out.tree.is_none());
        assert!(out.message.contains("X-9"));
    }

    #[test]
    fn negative_or_non_finite_costs_are_rejected() {
        for cost in [-500.0, f64::NAN, f64::INFINITY] {
            let fact = MaintenanceFact::new("P-1", "2024-06", FactAction::Plan).with_cost(cost);
            let out = apply_fact(&tree(), &fact);
            assert!(!out.success, "{cost}");
            assert!(out.tree.is_none());
            assert!(out.message.contains("invalid cost"));
        }

        let free = MaintenanceFact::new("P-1", "2024-06", FactAction::Plan).with_cost(0.0);
        assert!(apply_fact(&tree(), &free).success);
    }

    #[test]
    fn batch_folds_sequentially_and_collects_failures() {
        let facts = vec![
            MaintenanceFact::new("P-1", "2024-06", FactAction::Plan).with_cost(100.0),
            MaintenanceFact::new("X-9", "2024-06", FactAction::Plan),
            MaintenanceFact::new("P-2", "2024-06", FactAction::Plan).with_cost(250.0),
            MaintenanceFact::new("P-1", "2024-06", FactAction::Actual).with_cost(90.0),
        ];
        let out = apply_facts(&tree(), &facts);
        assert_eq!(out.applied, 3);
        assert_eq!(out.failures.len(), 1);
        assert_eq!(out.failures[0].index, 1);

        let plant = out.tree[0].rolled_up("2024-06");
        assert!(plant.planned && plant.actual);
        assert_eq!(plant.plan_cost, 350.0);
        assert_eq!(plant.actual_cost, 90.0);
    }
}
