//! Pattern-based suggestions: carry a fact over to the equipment's other open periods.

use super::locate::find_node;
use super::model::{EquipmentNode, MaintenanceFact};

/// Confidence multiplier for pattern-derived facts.
pub const DERIVED_CONFIDENCE_FACTOR: f64 = 0.8;

/// Propose the same action for the equipment's other periods that are not yet serviced.
///
/// Only periods already present in the node's `results` are considered; the fact's own period
/// and any period with `planned` or `actual` set are skipped. Unknown equipment, or a source fact
/// whose confidence is not positive (NaN included), yields nothing.
pub fn find_similar_facts(fact: &MaintenanceFact, roots: &[EquipmentNode]) -> Vec<MaintenanceFact> {
    if fact.confidence.is_nan() || fact.confidence <= 0.0 {
        return Vec::new();
    }
    let Some(node) = find_node(roots, &fact.equipment_id) else {
        return Vec::new();
    };

    node.results
        .iter()
        .filter(|(key, result)| **key != fact.time_header && !result.is_serviced())
        .map(|(key, _)| MaintenanceFact {
            equipment_id: fact.equipment_id.clone(),
            time_header: key.clone(),
            action: fact.action,
            cost: fact.cost,
            confidence: fact.confidence * DERIVED_CONFIDENCE_FACTOR,
            reason: format!(
                "pattern-derived from {} ({}): {}",
                fact.time_header, node.display_name, fact.reason
            ),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::find_similar_facts;
    use crate::hierarchy::{EquipmentNode, FactAction, MaintenanceFact, PeriodResult};

    fn tree() -> Vec<EquipmentNode> {
        let open = PeriodResult::default();
        let planned = PeriodResult {
            planned: true,
            ..Default::default()
        };
        vec![EquipmentNode::new("U-1", "Unit").with_children(vec![
            EquipmentNode::new("P-1", "Pump A-1")
                .with_result("2024-05", open)
                .with_result("2024-06", open)
                .with_result("2024-07", planned)
                .with_result("2024-08", open),
        ])]
    }

    #[test]
    fn proposes_only_unserviced_other_periods() {
        let fact = MaintenanceFact::new("P-1", "2024-06", FactAction::Plan)
            .with_cost(1200.0)
            .with_confidence(0.9)
            .with_reason("bearing noise");
        let out = find_similar_facts(&fact, &tree());

        let periods: Vec<&str> = out.iter().map(|f| f.time_header.as_str()).collect();
        assert_eq!(periods, vec!["2024-05", "2024-08"]);
        for f in &out {
            assert_eq!(f.action, FactAction::Plan);
            assert_eq!(f.cost, Some(1200.0));
            assert!((f.confidence - 0.72).abs() < 1e-9);
            assert!(f.confidence < fact.confidence);
            assert!(f.reason.contains("pattern-derived"));
        }
    }

    #[test]
    fn zero_or_nan_confidence_yields_nothing() {
        let mut fact = MaintenanceFact::new("P-1", "2024-06", FactAction::Plan);
        for confidence in [0.0, f64::NAN] {
            fact.confidence = confidence;
            assert!(find_similar_facts(&fact, &tree()).is_empty(), "{confidence}");
        }
    }

    #[test]
    fn unknown_equipment_yields_nothing() {
        let fact = MaintenanceFact::new("X-1", "2024-06", FactAction::Plan);
        assert!(find_similar_facts(&fact, &tree()).is_empty());
    }
}
