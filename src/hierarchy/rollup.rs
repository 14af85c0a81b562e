//! Bottom-up rollup of planned/actual status and cost.

use std::collections::{BTreeMap, BTreeSet};

use super::model::{EquipmentNode, PeriodResult, TimeKey};

/// Recompute `rolled_up_results` for every node that has children.
///
/// Post-order: children are rolled up before their parent. For each period seen in any child
/// (own or rolled-up results), the parent gets `planned`/`actual` OR-ed and costs summed over
/// its children. Leaves are returned unchanged. The computation only reads children, so running
/// it on an already aggregated tree yields the same tree.
pub fn aggregate(roots: &[EquipmentNode]) -> Vec<EquipmentNode> {
    aggregate_owned(roots.to_vec())
}

/// [`aggregate`] over a tree the caller already owns, without copying it again.
pub fn aggregate_owned(mut roots: Vec<EquipmentNode>) -> Vec<EquipmentNode> {
    roots.iter_mut().for_each(rollup_in_place);
    roots
}

/// [`aggregate`] for a single subtree.
pub fn aggregate_node(node: &EquipmentNode) -> EquipmentNode {
    let mut out = node.clone();
    rollup_in_place(&mut out);
    out
}

fn rollup_in_place(node: &mut EquipmentNode) {
    if node.is_leaf() {
        return;
    }
    node.children.iter_mut().for_each(rollup_in_place);
    node.rolled_up_results = Some(rollup_children(&node.children));
}

fn rollup_children(children: &[EquipmentNode]) -> BTreeMap<TimeKey, PeriodResult> {
    let keys: BTreeSet<&TimeKey> = children
        .iter()
        .flat_map(|c| {
            c.results
                .keys()
                .chain(c.rolled_up_results.iter().flat_map(|m| m.keys()))
        })
        .collect();

    keys.into_iter()
        .map(|key| {
            let total = children
                .iter()
                .fold(PeriodResult::default(), |acc, c| acc.merge(c.contribution(key)));
            (key.clone(), total)
        })
        .collect()
}
