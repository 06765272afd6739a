//! Common test utilities for building graphs and stores.
use keiro::prelude::*;

/// Creates a node of the given type with outputs derived from the registry.
#[allow(dead_code)]
pub fn node(id: &str, node_type: NodeType, x: f64, y: f64) -> WorkflowNode {
    let mut node = WorkflowNode::new(id.to_string(), node_type, Position::new(x, y));
    node.name = id.to_uppercase();
    node.outputs = outputs_for(&node);
    node
}

/// Creates a plain sequential edge between two nodes.
#[allow(dead_code)]
pub fn edge(id: &str, source: &str, target: &str, source_handle: &str) -> WorkflowEdge {
    WorkflowEdge {
        id: id.to_string(),
        source: source.to_string(),
        target: target.to_string(),
        source_handle: source_handle.to_string(),
        target_handle: "input".to_string(),
        label: None,
        loop_role: None,
        group_id: None,
        expression: None,
        version_id: None,
        selected: false,
        sync: SyncState::New,
    }
}

/// Creates an edge carrying loop context.
#[allow(dead_code)]
pub fn loop_edge(
    id: &str,
    source: &str,
    target: &str,
    source_handle: &str,
    role: LoopRole,
    group: &str,
) -> WorkflowEdge {
    let mut edge = edge(id, source, target, source_handle);
    edge.loop_role = Some(role);
    edge.group_id = Some(group.to_string());
    edge
}

/// Initializes a store from the given collections; every record starts out
/// synced, as after a backend load.
#[allow(dead_code)]
pub fn synced_store(nodes: Vec<WorkflowNode>, edges: Vec<WorkflowEdge>) -> GraphStore {
    let mut store = GraphStore::new();
    store.initialize_from_backend(nodes, edges);
    store
}

/// `A (webhook) --none--> B (send_email)`
#[allow(dead_code)]
pub fn trigger_action_store() -> GraphStore {
    synced_store(
        vec![
            node("a", NodeType::Webhook, 0.0, 0.0),
            node("b", NodeType::SendEmail, 250.0, 0.0),
        ],
        vec![edge("ab", "a", "b", "none")],
    )
}

/// `A (conditional) --on_true--> C`, `A --on_false--> D`
#[allow(dead_code)]
pub fn conditional_store() -> GraphStore {
    synced_store(
        vec![
            node("a", NodeType::Conditional, 0.0, 0.0),
            node("c", NodeType::SendEmail, 250.0, -100.0),
            node("d", NodeType::SendEmail, 250.0, 100.0),
        ],
        vec![
            edge("ac", "a", "c", "on_true"),
            edge("ad", "a", "d", "on_false"),
        ],
    )
}

/// A loop controller `l` with one body node `x`:
/// `l --body--> x` (loop-child), `x --none--> l` (loop-back), plus the
/// controller's own self edge.
#[allow(dead_code)]
pub fn loop_store() -> GraphStore {
    let mut l = node("l", NodeType::Loop, 0.0, 0.0);
    l.outputs = vec!["body".to_string(), "end".to_string()];
    let mut x = node("x", NodeType::SendEmail, 150.0, 150.0);
    x.parent_loop = Some("l".to_string());

    synced_store(
        vec![l, x],
        vec![
            loop_edge("ll", "l", "l", "body", LoopRole::SelfLoop, "l"),
            loop_edge("lx", "l", "x", "body", LoopRole::LoopChild, "l"),
            loop_edge("xl", "x", "l", "none", LoopRole::LoopBack, "l"),
        ],
    )
}

/// Finds the single edge between two nodes, panicking when absent.
#[allow(dead_code)]
pub fn edge_between<'a>(store: &'a GraphStore, source: &str, target: &str) -> &'a WorkflowEdge {
    store
        .edges()
        .iter()
        .find(|e| e.source == source && e.target == target)
        .unwrap_or_else(|| panic!("expected an edge {source} -> {target}"))
}

#[allow(dead_code)]
pub fn node_ids(store: &GraphStore) -> Vec<&str> {
    store.nodes().iter().map(|n| n.id.as_str()).collect()
}
