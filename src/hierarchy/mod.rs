//! Equipment hierarchy and maintenance fact application.
//!
//! The tree is a plain value (`Vec<EquipmentNode>` of roots). Every operation takes the tree by
//! reference and returns a new tree; nothing is modified in place, so callers substitute the
//! returned tree before issuing the next mutation.
//!
//! - [`find_node`]: depth-first lookup by id, alternate code, or partial name
//! - [`apply_to_node`]: fold one [`MaintenanceFact`] into a node copy
//! - [`aggregate`]: post-order recomputation of every branch's `rolled_up_results`
//! - [`apply_fact`] / [`apply_facts`]: locate → mutate → splice → aggregate
//! - [`find_similar_facts`]: derive lower-confidence facts for other open periods
//! - [`tree_from_json`] / [`tree_from_path`]: load a stored tree
//!
//! ## Example
//!
//! ```rust
//! use maintenance_import::hierarchy::{apply_fact, EquipmentNode, FactAction, MaintenanceFact};
//!
//! let tree = vec![EquipmentNode::new("PL-1", "Plant")
//!     .with_children(vec![EquipmentNode::new("P-1", "Pump A-1")])];
//!
//! let fact = MaintenanceFact::new("P-1", "2024-06", FactAction::Both).with_cost(80000.0);
//! let out = apply_fact(&tree, &fact);
//! assert!(out.success);
//!
//! let new_tree = out.tree.unwrap();
//! assert_eq!(new_tree[0].rolled_up("2024-06").plan_cost, 80000.0);
//! // The input is untouched.
//! assert!(tree[0].rolled_up_results.is_none());
//! ```

pub mod apply;
pub mod expand;
pub mod load;
pub mod locate;
pub mod model;
pub mod mutate;
pub mod rollup;

pub use apply::{apply_fact, apply_facts, ApplyOutcome, BatchFailure, BatchOutcome};
pub use expand::{find_similar_facts, DERIVED_CONFIDENCE_FACTOR};
pub use load::{tree_from_json, tree_from_path};
pub use locate::{find_node, find_path};
pub use model::{EquipmentNode, FactAction, MaintenanceFact, PeriodResult, Specification, TimeKey};
pub use mutate::{apply_to_node, replace_node, PROVENANCE_KEY, PROVENANCE_VALUE};
pub use rollup::{aggregate, aggregate_node, aggregate_owned};
