//! Internal graph to persistence shape mapping.
//!
//! The defaulting patches applied here (`membership_invite` app/role pairing,
//! `webhook` method and auth) are data-shape compatibility rules for
//! workflows persisted by existing backends; they fill gaps, they do not
//! overwrite configured values.

use serde_json::{json, Value};

use super::external::{ExternalEdge, ExternalNode};
use crate::graph::{NodeType, WorkflowEdge, WorkflowNode};

/// Collapses a visual source handle back to the semantic condition tag the
/// backend persists. Branch handles (`on_true`, `on_false`, `case_N`) pass
/// through; sequential and loop handles all collapse to `none`.
pub fn handle_to_condition(source_handle: &str) -> String {
    if source_handle.starts_with("case_") || matches!(source_handle, "on_true" | "on_false") {
        source_handle.to_string()
    } else {
        "none".to_string()
    }
}

/// Maps a node into the persistence shape.
pub fn to_external_node(node: &WorkflowNode) -> ExternalNode {
    let mut config = serde_json::to_value(&node.config).unwrap_or_default();
    apply_config_defaults(node.node_type, &mut config);

    ExternalNode {
        id: node.id.clone(),
        version_id: node.version_id.clone().unwrap_or_default(),
        name: node.name.clone(),
        description: node.description.clone(),
        node_type: node.node_type.as_str().to_string(),
        parent_id: node.parent_loop.clone(),
        template_id: node.template_id.clone().unwrap_or_default(),
        config,
        retry_attempts: 0,
        retry_delay_ms: 0,
        position: node.position,
    }
}

/// Maps an edge into the persistence shape.
pub fn to_external_edge(edge: &WorkflowEdge) -> ExternalEdge {
    ExternalEdge {
        id: edge.id.clone(),
        version_id: edge.version_id.clone().unwrap_or_default(),
        source_id: edge.source.clone(),
        target_id: edge.target.clone(),
        group_id: edge.group_id.clone(),
        condition: Some(handle_to_condition(&edge.source_handle)),
        expression: edge.expression.clone().unwrap_or_default(),
    }
}

fn apply_config_defaults(node_type: NodeType, config: &mut Value) {
    if !config.is_object() {
        *config = Value::Object(serde_json::Map::new());
    }
    let Some(map) = config.as_object_mut() else {
        return;
    };

    match node_type {
        NodeType::MembershipInvite => {
            map.entry("appName").or_insert_with(|| json!("KYC"));
            map.entry("roleIds").or_insert_with(|| json!([17]));
        }
        NodeType::Webhook => {
            map.entry("method").or_insert_with(|| json!("POST"));
            map.entry("authentication")
                .or_insert_with(|| json!({ "type": "none" }));
        }
        _ => {}
    }
}
