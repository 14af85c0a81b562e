//! Node lookup by id, alternate code, or partial name.

use super::model::EquipmentNode;

/// Find a node by lookup token.
///
/// Depth-first, pre-order over `roots`. Any exact `id` / `alternate_code` match wins over a
/// display-name match; among name matches (case-insensitive substring), the first in traversal
/// order wins. An empty token matches nothing.
pub fn find_node<'a>(roots: &'a [EquipmentNode], token: &str) -> Option<&'a EquipmentNode> {
    find_path(roots, token).and_then(|path| node_at(roots, &path))
}

/// Ids from the root down to the node [`find_node`] would return.
pub fn find_path(roots: &[EquipmentNode], token: &str) -> Option<Vec<String>> {
    let token = token.trim();
    if token.is_empty() {
        return None;
    }

    let mut path = Vec::new();
    if search(roots, &mut path, &|n| is_exact_match(n, token)) {
        return Some(path);
    }

    let needle = token.to_lowercase();
    path.clear();
    search(roots, &mut path, &|n| n.display_name.to_lowercase().contains(&needle)).then_some(path)
}

fn is_exact_match(node: &EquipmentNode, token: &str) -> bool {
    node.id == token || node.alternate_code.as_deref() == Some(token)
}

fn search(nodes: &[EquipmentNode], path: &mut Vec<String>, pred: &dyn Fn(&EquipmentNode) -> bool) -> bool {
    for node in nodes {
        path.push(node.id.clone());
        if pred(node) || search(&node.children, path, pred) {
            return true;
        }
        path.pop();
    }
    false
}

fn node_at<'a>(roots: &'a [EquipmentNode], path: &[String]) -> Option<&'a EquipmentNode> {
    let (first, rest) = path.split_first()?;
    let mut node = roots.iter().find(|n| &n.id == first)?;
    for id in rest {
        node = node.children.iter().find(|n| &n.id == id)?;
    }
    Some(node)
}

#[cfg(test)]
mod tests {
    use super::{find_node, find_path};
    use crate::hierarchy::EquipmentNode;

    fn plant() -> Vec<EquipmentNode> {
        vec![EquipmentNode::new("PL-1", "Plant North").with_children(vec![
            EquipmentNode::new("U-1", "Unit 1").with_children(vec![
                EquipmentNode::new("P-1", "Pump A-1").with_alternate_code("PMP-001"),
                EquipmentNode::new("P-2", "Pump A-2"),
            ]),
            EquipmentNode::new("U-2", "Unit 2 (pump P-2 spare)"),
        ])]
    }

    #[test]
    fn finds_by_id_and_alternate_code() {
        let tree = plant();
        assert_eq!(find_node(&tree, "P-2").map(|n| n.id.as_str()), Some("P-2"));
        assert_eq!(find_node(&tree, "PMP-001").map(|n| n.id.as_str()), Some("P-1"));
    }

    #[test]
    fn exact_match_beats_earlier_name_match() {
        // U-9 is visited first and its name contains "p-2".
        let tree = vec![
            EquipmentNode::new("U-9", "Spare for P-2"),
            EquipmentNode::new("L-1", "Line 1").with_children(vec![
                EquipmentNode::new("P-2", "Pump A-2"),
                EquipmentNode::new("P-3", "Pump A-3").with_alternate_code("Spare"),
            ]),
        ];
        assert_eq!(find_node(&tree, "P-2").map(|n| n.id.as_str()), Some("P-2"));
        assert_eq!(find_node(&tree, "Spare").map(|n| n.id.as_str()), Some("P-3"));
        assert_eq!(find_node(&tree, "spare").map(|n| n.id.as_str()), Some("U-9"));
    }

    #[test]
    fn falls_back_to_case_insensitive_name_containment() {
        let tree = plant();
        assert_eq!(find_node(&tree, "pump a").map(|n| n.id.as_str()), Some("P-1"));
        assert_eq!(find_node(&tree, "unit").map(|n| n.id.as_str()), Some("U-1"));
    }

    #[test]
    fn returns_path_from_root() {
        let tree = plant();
        assert_eq!(
            find_path(&tree, "P-1"),
            Some(vec!["PL-1".to_string(), "U-1".to_string(), "P-1".to_string()])
        );
    }

    #[test]
    fn missing_or_empty_token_is_not_found() {
        let tree = plant();
        assert!(find_node(&tree, "X-99").is_none());
        assert!(find_node(&tree, "  ").is_none());
    }
}
