//! Pure topology helpers shared by the store and the loop builder.
//!
//! Everything in this module is a function over node/edge slices; no helper
//! touches store state. The store recomputes the connected-handle map after
//! each mutation and hands it to the rendering layer, which uses it to decide
//! whether an output port still offers an "add" affordance.

mod loops;

pub use loops::{rebuild_loop_topology, LoopRebuild};

use ahash::{AHashMap, AHashSet};

use crate::graph::{
    mint_id, EdgeId, LoopRole, NodeConfig, NodeId, WorkflowEdge, WorkflowNode, HANDLE_INPUT,
    HANDLE_NONE,
};
use crate::registry;

/// Map from node id to the set of its occupied output handles.
pub type ConnectedHandles = AHashMap<NodeId, AHashSet<String>>;

/// Records, for every edge, that its source handle is occupied.
///
/// When a node slice is supplied, entries for ids absent from it are dropped
/// so the map never carries references to deleted nodes.
pub fn connected_handles(
    edges: &[WorkflowEdge],
    nodes: Option<&[WorkflowNode]>,
) -> ConnectedHandles {
    let mut map: ConnectedHandles = AHashMap::new();
    for edge in edges {
        if edge.source.is_empty() || edge.target.is_empty() {
            continue;
        }
        map.entry(edge.source.clone())
            .or_default()
            .insert(edge.source_handle.clone());
    }

    if let Some(nodes) = nodes {
        let live: AHashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
        map.retain(|id, _| live.contains(id.as_str()));
    }

    map
}

/// Display label for a bare source handle.
///
/// Sequential handles (`next`, `done`, `success`, `none`) carry no label;
/// boolean branches render as `true`/`false`, switch cases as `Case N`, and
/// anything else echoes the handle name.
pub fn edge_label(source_handle: &str) -> Option<String> {
    match source_handle {
        "next" | "done" | "success" | "none" => None,
        "on_true" => Some("true".to_string()),
        "on_false" => Some("false".to_string()),
        other => match case_number(other) {
            Some(num) => Some(format!("Case {num}")),
            None => Some(other.to_string()),
        },
    }
}

/// Display label for a handle on a specific node, consulting the node's
/// definition first. Returns `None` when the definition has no opinion and
/// the handle is not a switch case.
pub fn edge_label_for_node(node: &WorkflowNode, handle: &str) -> Option<String> {
    let normalized = normalize_handle(handle);
    let def = registry::definition_for(node.node_type);

    if let Some(label) = def.label_for(&normalized) {
        return Some(label.to_string());
    }
    case_number(&normalized).map(|num| format!("Case {num}"))
}

/// Lowercases a handle and strips the `on_` branch prefix.
pub fn normalize_handle(handle: &str) -> String {
    let lowered = handle.to_lowercase();
    lowered
        .strip_prefix("on_")
        .map(|s| s.to_string())
        .unwrap_or(lowered)
}

fn case_number(handle: &str) -> Option<&str> {
    handle.strip_prefix("case_").filter(|num| !num.is_empty())
}

/// Everything [`make_edge`] needs to know about the edge being synthesized;
/// omitted fields take their documented defaults.
#[derive(Debug, Clone, Default)]
pub struct EdgeSpec {
    pub id: Option<EdgeId>,
    pub source: NodeId,
    pub target: NodeId,
    pub source_handle: Option<String>,
    pub target_handle: Option<String>,
    pub loop_role: Option<LoopRole>,
    pub group_id: Option<NodeId>,
    pub expression: Option<String>,
}

impl EdgeSpec {
    pub fn between(source: impl Into<NodeId>, target: impl Into<NodeId>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            ..Self::default()
        }
    }

    pub fn with_source_handle(mut self, handle: impl Into<String>) -> Self {
        self.source_handle = Some(handle.into());
        self
    }

    pub fn with_target_handle(mut self, handle: impl Into<String>) -> Self {
        self.target_handle = Some(handle.into());
        self
    }

    pub fn with_loop_role(mut self, role: LoopRole) -> Self {
        self.loop_role = Some(role);
        self
    }

    pub fn with_group(mut self, group_id: impl Into<NodeId>) -> Self {
        self.group_id = Some(group_id.into());
        self
    }
}

/// Synthesizes a consistent edge from a partial spec.
///
/// Fills in a fresh id and the default handles, stamps the ambient version
/// id, and derives the display label and switch-case expression from the
/// source node when it can be found in `nodes`.
pub fn make_edge(nodes: &[WorkflowNode], version_id: Option<&str>, spec: EdgeSpec) -> WorkflowEdge {
    let source_handle = spec.source_handle.unwrap_or_else(|| HANDLE_NONE.to_string());
    let target_handle = spec
        .target_handle
        .unwrap_or_else(|| HANDLE_INPUT.to_string());

    let source_node = nodes.iter().find(|n| n.id == spec.source);
    let label = source_node.and_then(|node| edge_label_for_node(node, &source_handle));

    // A switch branch carries its case's literal condition text.
    let case_expression = source_node.and_then(|node| match &node.config {
        NodeConfig::Switch { switch_cases } => switch_cases
            .iter()
            .find(|case| case.condition == source_handle)
            .map(|case| case.expression.clone()),
        _ => None,
    });

    WorkflowEdge {
        id: spec.id.unwrap_or_else(mint_id),
        source: spec.source,
        target: spec.target,
        source_handle,
        target_handle,
        label,
        loop_role: spec.loop_role,
        group_id: spec.group_id,
        expression: case_expression.or(spec.expression),
        version_id: version_id.map(|v| v.to_string()),
        selected: false,
        sync: Default::default(),
    }
}
