//! Folding a single maintenance fact into a node.

use super::model::{EquipmentNode, FactAction, MaintenanceFact, Specification};

/// Specification key recording that a node was updated from a suggestion.
pub const PROVENANCE_KEY: &str = "maintenance_note";
/// Specification value recorded under [`PROVENANCE_KEY`].
pub const PROVENANCE_VALUE: &str = "updated from suggestion";

/// Return a copy of `node` with `fact` applied to `results[fact.time_header]`.
///
/// - `Plan`: sets `planned`, and `plan_cost` when a cost is given
/// - `Actual`: sets `actual`, and `actual_cost` when a cost is given
/// - `Both`: sets both flags, and both costs (not split) when a cost is given
///
/// A provenance line is appended to the specifications once; re-applying does not duplicate it.
pub fn apply_to_node(node: &EquipmentNode, fact: &MaintenanceFact) -> EquipmentNode {
    let mut out = node.clone();

    let mut period = out.result(&fact.time_header);
    match fact.action {
        FactAction::Plan => {
            period.planned = true;
            if let Some(cost) = fact.cost {
                period.plan_cost = cost;
            }
        }
        FactAction::Actual => {
            period.actual = true;
            if let Some(cost) = fact.cost {
                period.actual_cost = cost;
            }
        }
        FactAction::Both => {
            period.planned = true;
            period.actual = true;
            if let Some(cost) = fact.cost {
                period.plan_cost = cost;
                period.actual_cost = cost;
            }
        }
    }
    out.results.insert(fact.time_header.clone(), period);

    if !out.specifications.iter().any(|s| s.key == PROVENANCE_KEY) {
        let order = out.specifications.iter().map(|s| s.order + 1).max().unwrap_or(0);
        out.specifications
            .push(Specification::new(PROVENANCE_KEY, PROVENANCE_VALUE, order));
    }

    out
}

/// Return a copy of `roots` with the node `id` replaced by `replacement`.
///
/// Returns `None` if no node has that id.
pub fn replace_node(roots: &[EquipmentNode], id: &str, replacement: EquipmentNode) -> Option<Vec<EquipmentNode>> {
    let mut out = roots.to_vec();
    replace_in(&mut out, id, &mut Some(replacement)).then_some(out)
}

fn replace_in(nodes: &mut [EquipmentNode], id: &str, replacement: &mut Option<EquipmentNode>) -> bool {
    for node in nodes.iter_mut() {
        if node.id == id {
            if let Some(r) = replacement.take() {
                *node = r;
            }
            return true;
        }
        if replace_in(&mut node.children, id, replacement) {
            return true;
        }
    }
    false
}
