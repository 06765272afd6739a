//! Backend document to internal graph mapping.
//!
//! Handles are a client-side concept: the backend persists semantic
//! `condition` tags and loop `group_id` ownership, and this module rederives
//! output handles, loop roles, and labels before the store is initialized.

use ahash::AHashSet;
use log::debug;

use super::external::{ExternalEdge, ExternalNode, WorkflowDocument};
use crate::error::DocumentError;
use crate::graph::{
    LoopMode, LoopRole, MembershipInviteConfig, NodeConfig, NodeType, SwitchCase, WebhookConfig,
    WorkflowEdge, WorkflowNode, HANDLE_BODY, HANDLE_INPUT, HANDLE_NONE,
};

/// Maps a backend document into internal node/edge collections, ready for
/// [`crate::store::GraphStore::initialize_from_backend`].
///
/// Duplicate edge ids are skipped, and edges referencing nodes absent from
/// the document are dropped (structural inconsistency is self-healing, never
/// an error). Unknown node types are the one thing that fails the import.
pub fn import_document(
    document: &WorkflowDocument,
) -> Result<(Vec<WorkflowNode>, Vec<WorkflowEdge>), DocumentError> {
    let mut nodes = Vec::with_capacity(document.nodes.len());
    for external in &document.nodes {
        nodes.push(import_node(external)?);
    }

    let mut edges = Vec::with_capacity(document.edges.len());
    let mut seen: AHashSet<&str> = AHashSet::new();
    let mut dropped = 0usize;
    for external in &document.edges {
        if !seen.insert(external.id.as_str()) {
            continue;
        }
        match import_edge(external, document) {
            Some(edge) => edges.push(edge),
            None => dropped += 1,
        }
    }
    if dropped > 0 {
        debug!("import: dropped {dropped} edge(s) referencing missing nodes");
    }

    Ok((nodes, edges))
}

fn import_node(external: &ExternalNode) -> Result<WorkflowNode, DocumentError> {
    let node_type = parse_node_type(&external.node_type).ok_or_else(|| {
        DocumentError::UnknownNodeType {
            node_id: external.id.clone(),
            type_name: external.node_type.clone(),
        }
    })?;
    let config = config_from_wire(node_type, &external.config);

    Ok(WorkflowNode {
        id: external.id.clone(),
        node_type,
        name: external.name.clone(),
        description: external.description.clone(),
        version_id: non_empty(&external.version_id),
        template_id: non_empty(&external.template_id),
        outputs: derive_outputs(node_type, &config),
        config,
        parent_loop: external.parent_id.clone(),
        position: external.position,
        selected: false,
        sync: Default::default(),
    })
}

fn import_edge(external: &ExternalEdge, document: &WorkflowDocument) -> Option<WorkflowEdge> {
    let source = document
        .nodes
        .iter()
        .find(|n| n.id == external.source_id)?;
    document.nodes.iter().find(|n| n.id == external.target_id)?;
    let source_is_loop = source.node_type == NodeType::Loop.as_str();

    let loop_role = classify_loop_role(external, source_is_loop);

    let condition = external
        .condition
        .as_deref()
        .filter(|c| !c.is_empty() && *c != "none");
    let source_handle = match condition {
        Some(condition) => condition.to_string(),
        None => match loop_role {
            Some(LoopRole::SelfLoop) | Some(LoopRole::LoopChild) => HANDLE_BODY.to_string(),
            Some(LoopRole::End) => "done".to_string(),
            // A nested loop closing its parent connects through its own exit
            // handle; an ordinary body node through its sequential one.
            Some(LoopRole::LoopBack) | None => {
                if source_is_loop {
                    "done".to_string()
                } else {
                    HANDLE_NONE.to_string()
                }
            }
        },
    };

    let label = condition
        .filter(|c| *c != HANDLE_BODY)
        .map(|c| c.to_string());

    Some(WorkflowEdge {
        id: external.id.clone(),
        source: external.source_id.clone(),
        target: external.target_id.clone(),
        source_handle,
        target_handle: HANDLE_INPUT.to_string(),
        label,
        loop_role,
        group_id: external.group_id.clone(),
        expression: non_empty(&external.expression),
        version_id: non_empty(&external.version_id),
        selected: false,
        sync: Default::default(),
    })
}

/// Classifies an edge's role from its loop-group ownership: a group-owned
/// edge is the controller's self edge, the entry into the body, or the edge
/// closing the body; a groupless edge leaving a loop is an exit.
fn classify_loop_role(edge: &ExternalEdge, source_is_loop: bool) -> Option<LoopRole> {
    match edge.group_id.as_deref() {
        Some(group) => {
            if edge.source_id == edge.target_id {
                Some(LoopRole::SelfLoop)
            } else if edge.source_id == group {
                Some(LoopRole::LoopChild)
            } else if edge.target_id == group {
                Some(LoopRole::LoopBack)
            } else {
                None
            }
        }
        None if source_is_loop => Some(LoopRole::End),
        None => None,
    }
}

/// Output handles as persisted documents imply them. Loop nodes historically
/// load with a `done` exit handle (the registry declares `end` for freshly
/// converted ones); both spellings are kept for wire compatibility.
fn derive_outputs(node_type: NodeType, config: &NodeConfig) -> Vec<String> {
    match node_type {
        NodeType::Conditional | NodeType::RuleExecutor => {
            vec!["on_true".to_string(), "on_false".to_string()]
        }
        NodeType::Switch => config
            .switch_cases()
            .map(|cases| cases.iter().map(|c| c.condition.clone()).collect())
            .unwrap_or_default(),
        NodeType::Loop => vec![HANDLE_BODY.to_string(), "done".to_string()],
        _ => vec![HANDLE_NONE.to_string()],
    }
}

/// Parses a wire type name into the closed type set.
fn parse_node_type(name: &str) -> Option<NodeType> {
    serde_json::from_value(serde_json::Value::String(name.to_string())).ok()
}

/// Interprets a raw config for the types the engine understands; anything
/// that does not fit a known shape rides along untouched. Config contents are
/// validated by the host's form layer, never here.
fn config_from_wire(node_type: NodeType, raw: &serde_json::Value) -> NodeConfig {
    if raw.is_null() {
        return NodeConfig::default();
    }
    let parsed = match node_type {
        NodeType::Switch => {
            #[derive(serde::Deserialize)]
            struct SwitchWire {
                #[serde(rename = "switchCases", default)]
                switch_cases: Vec<SwitchCase>,
            }
            serde_json::from_value::<SwitchWire>(raw.clone())
                .ok()
                .map(|wire| NodeConfig::switch(wire.switch_cases))
        }
        NodeType::Loop => serde_json::from_value::<LoopMode>(raw.clone())
            .ok()
            .map(NodeConfig::Loop),
        NodeType::Webhook => serde_json::from_value::<WebhookConfig>(raw.clone())
            .ok()
            .map(NodeConfig::Webhook),
        NodeType::MembershipInvite => serde_json::from_value::<MembershipInviteConfig>(raw.clone())
            .ok()
            .map(NodeConfig::MembershipInvite),
        _ => None,
    };
    parsed.unwrap_or_else(|| NodeConfig::Other(raw.clone()))
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
