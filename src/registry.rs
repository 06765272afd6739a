//! Static per-type handle definitions.
//!
//! The registry maps a [`NodeType`] to its output-handle set, default input
//! handle, and optional self-loop handle. It never fails closed: types
//! without a dedicated entry resolve to the single-output default so the
//! canvas always has something to attach an edge to.

use crate::graph::{NodeConfig, NodeType, WorkflowNode};

/// Handle layout of a node type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeDefinition {
    /// Output handle names in declaration order.
    pub outputs: &'static [&'static str],
    /// The input handle new edges attach to by default.
    pub default_target: &'static str,
    /// Handle carrying the loop self edge, for looping types.
    pub self_loop_handle: Option<&'static str>,
    /// Static display labels keyed by normalized handle name.
    pub labels: &'static [(&'static str, &'static str)],
}

impl NodeDefinition {
    /// Display label for a normalized handle, if the definition declares one.
    pub fn label_for(&self, handle: &str) -> Option<&'static str> {
        self.labels
            .iter()
            .find(|(name, _)| *name == handle)
            .map(|(_, label)| *label)
    }
}

const DEFAULT_DEFINITION: NodeDefinition = NodeDefinition {
    outputs: &["none"],
    default_target: "input",
    self_loop_handle: None,
    labels: &[],
};

const BOOLEAN_BRANCH: NodeDefinition = NodeDefinition {
    outputs: &["on_true", "on_false"],
    default_target: "input",
    self_loop_handle: None,
    labels: &[("true", "True"), ("false", "False")],
};

const SWITCH_DEFINITION: NodeDefinition = NodeDefinition {
    outputs: &["case_1"],
    default_target: "input",
    self_loop_handle: None,
    labels: &[("case_1", "Case 1")],
};

const LOOP_DEFINITION: NodeDefinition = NodeDefinition {
    outputs: &["body", "end"],
    default_target: "input",
    self_loop_handle: Some("body"),
    labels: &[("body", "Loop Body"), ("end", "Loop End")],
};

const MERGE_DEFINITION: NodeDefinition = NodeDefinition {
    outputs: &["none"],
    default_target: "input-1",
    self_loop_handle: None,
    labels: &[],
};

const SPLIT_DEFINITION: NodeDefinition = NodeDefinition {
    outputs: &["none"],
    default_target: "input",
    self_loop_handle: None,
    labels: &[("item", "Each Item")],
};

/// Resolves the handle definition for a node type.
pub fn definition_for(node_type: NodeType) -> &'static NodeDefinition {
    match node_type {
        NodeType::Conditional | NodeType::RuleExecutor => &BOOLEAN_BRANCH,
        NodeType::Switch => &SWITCH_DEFINITION,
        NodeType::Loop => &LOOP_DEFINITION,
        NodeType::Merge => &MERGE_DEFINITION,
        NodeType::Split => &SPLIT_DEFINITION,
        _ => &DEFAULT_DEFINITION,
    }
}

/// Effective output handles of a node.
///
/// Switch nodes derive one handle per configured case (`case_1..case_N`),
/// falling back to a single `case_1` when no cases are configured yet; every
/// other type takes its static definition.
pub fn outputs_for(node: &WorkflowNode) -> Vec<String> {
    if node.node_type == NodeType::Switch {
        if let NodeConfig::Switch { switch_cases } = &node.config {
            if !switch_cases.is_empty() {
                return switch_cases
                    .iter()
                    .enumerate()
                    .map(|(i, case)| {
                        if case.condition.is_empty() {
                            format!("case_{}", i + 1)
                        } else {
                            case.condition.clone()
                        }
                    })
                    .collect();
            }
        }
        return vec!["case_1".to_string()];
    }

    definition_for(node.node_type)
        .outputs
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// The input handle edges targeting this node type attach to.
pub fn target_handle_for(node_type: NodeType) -> &'static str {
    definition_for(node_type).default_target
}

/// The handle carrying a self edge, for types that loop onto themselves.
pub fn self_loop_handle(node_type: NodeType) -> Option<&'static str> {
    definition_for(node_type).self_loop_handle
}
