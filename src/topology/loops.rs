//! Loop conversion: rebuilds the edges around a node that has just been
//! retyped to `loop` into the self-loop / loop-child / loop-back / end shape
//! the canvas renders.

use ahash::AHashSet;

use crate::graph::{
    mint_id, EdgeId, LoopRole, NodeId, NodeType, Position, SyncState, WorkflowEdge, WorkflowNode,
    HANDLE_BODY, HANDLE_END, HANDLE_INPUT, HANDLE_NONE,
};

/// Replacement collections produced by [`rebuild_loop_topology`].
///
/// Deletions and additions are disjoint: every new edge carries a fresh id,
/// so a sync diff can treat the two sets independently. Callers must record
/// the deletions before committing the new collections.
#[derive(Debug, Clone)]
pub struct LoopRebuild {
    pub nodes: Vec<WorkflowNode>,
    pub edges: Vec<WorkflowEdge>,
    pub deleted_node_ids: Vec<NodeId>,
    pub deleted_edge_ids: Vec<EdgeId>,
}

/// Rebuilds all edges touching a node freshly converted to the `loop` type.
///
/// `merged` is the post-retype node (new id); `old_node_id` is the identity it
/// replaced. Every outgoing edge of the old node is dropped (collecting
/// orphaned placeholder targets), every incoming edge is recreated against
/// the merged id, and the loop shape is synthesized: the mandatory
/// `body -> body` self edge plus a placeholder successor wired through the
/// `end` handle — back into the enclosing loop when the node is nested,
/// straight out of the graph otherwise.
pub fn rebuild_loop_topology<F>(
    mut merged: WorkflowNode,
    old_node_id: &str,
    nodes: &[WorkflowNode],
    edges: &[WorkflowEdge],
    version_id: Option<&str>,
    mut new_placeholder: F,
) -> LoopRebuild
where
    F: FnMut(Position) -> WorkflowNode,
{
    merged.outputs = vec![HANDLE_BODY.to_string(), HANDLE_END.to_string()];

    let mut nodes_to_delete: AHashSet<NodeId> = AHashSet::new();
    let mut edges_to_delete: AHashSet<EdgeId> = AHashSet::new();

    // Outgoing cleanup. Whatever the node pointed at before the conversion no
    // longer applies; placeholder targets with no other inbound edge go too.
    for edge in edges
        .iter()
        .filter(|e| e.source == merged.id || e.source == old_node_id)
    {
        edges_to_delete.insert(edge.id.clone());

        let Some(target) = nodes.iter().find(|n| n.id == edge.target) else {
            continue;
        };
        if target.node_type != NodeType::VoidNode {
            continue;
        }
        let orphaned = !edges.iter().any(|e| {
            e.target == target.id && e.source != merged.id && e.source != old_node_id
        });
        if orphaned {
            nodes_to_delete.insert(target.id.clone());
        }
    }

    // Incoming rewiring: recreate under fresh ids so upstream connectivity
    // survives the identity change without reusing edge ids.
    let incoming: Vec<&WorkflowEdge> = edges.iter().filter(|e| e.target == old_node_id).collect();
    for edge in &incoming {
        edges_to_delete.insert(edge.id.clone());
    }
    let mut rewired: Vec<WorkflowEdge> = incoming
        .iter()
        .map(|edge| {
            let mut replacement = (*edge).clone();
            replacement.id = mint_id();
            replacement.target = merged.id.clone();
            replacement.sync = SyncState::New;
            replacement
        })
        .collect();

    let deleted_edge_ids: Vec<EdgeId> = edges
        .iter()
        .filter(|e| edges_to_delete.contains(&e.id))
        .map(|e| e.id.clone())
        .collect();
    let mut final_edges: Vec<WorkflowEdge> = edges
        .iter()
        .filter(|e| !edges_to_delete.contains(&e.id))
        .cloned()
        .collect();

    let container_loop = merged.parent_loop.clone();
    let Position { x, y } = merged.position;
    let mut loop_nodes: Vec<WorkflowNode> = Vec::new();
    let mut loop_edges: Vec<WorkflowEdge> = Vec::new();

    // The self edge is the visual loop-body affordance and always exists.
    loop_edges.push(WorkflowEdge {
        id: mint_id(),
        source: merged.id.clone(),
        target: merged.id.clone(),
        source_handle: HANDLE_BODY.to_string(),
        target_handle: HANDLE_BODY.to_string(),
        label: None,
        loop_role: Some(LoopRole::SelfLoop),
        group_id: Some(merged.id.clone()),
        expression: None,
        version_id: version_id.map(|v| v.to_string()),
        selected: false,
        sync: SyncState::New,
    });

    let enclosing = container_loop
        .as_deref()
        .and_then(|container| nodes.iter().find(|n| n.id == container));

    if let Some(parent) = enclosing {
        let container = parent.id.clone();

        // Edges arriving from the enclosing loop now open this nested body.
        for edge in &mut rewired {
            if edge.source == container {
                edge.target_handle = HANDLE_INPUT.to_string();
                edge.loop_role = Some(LoopRole::LoopChild);
                edge.group_id = Some(container.clone());
            }
        }

        let mut done = new_placeholder(Position::new(x + 260.0, y));
        done.parent_loop = Some(container.clone());

        loop_edges.push(WorkflowEdge {
            id: mint_id(),
            source: merged.id.clone(),
            target: done.id.clone(),
            source_handle: HANDLE_END.to_string(),
            target_handle: HANDLE_INPUT.to_string(),
            label: None,
            loop_role: Some(LoopRole::LoopChild),
            group_id: Some(container.clone()),
            expression: None,
            version_id: version_id.map(|v| v.to_string()),
            selected: false,
            sync: SyncState::New,
        });
        loop_edges.push(WorkflowEdge {
            id: mint_id(),
            source: done.id.clone(),
            target: container.clone(),
            source_handle: HANDLE_NONE.to_string(),
            target_handle: HANDLE_BODY.to_string(),
            label: None,
            loop_role: Some(LoopRole::LoopBack),
            group_id: Some(container),
            expression: None,
            version_id: version_id.map(|v| v.to_string()),
            selected: false,
            sync: SyncState::New,
        });

        loop_nodes.push(done);
    } else {
        let mut done = new_placeholder(Position::new(x + 260.0, y));
        done.parent_loop = container_loop;

        loop_edges.push(WorkflowEdge {
            id: mint_id(),
            source: merged.id.clone(),
            target: done.id.clone(),
            source_handle: HANDLE_END.to_string(),
            target_handle: HANDLE_INPUT.to_string(),
            label: None,
            loop_role: Some(LoopRole::End),
            group_id: None,
            expression: None,
            version_id: version_id.map(|v| v.to_string()),
            selected: false,
            sync: SyncState::New,
        });

        loop_nodes.push(done);
    }

    let mut final_nodes: Vec<WorkflowNode> = nodes
        .iter()
        .filter(|n| !nodes_to_delete.contains(&n.id))
        .map(|n| {
            if n.id == old_node_id {
                merged.clone()
            } else {
                n.clone()
            }
        })
        .collect();
    final_nodes.append(&mut loop_nodes);

    final_edges.append(&mut rewired);
    final_edges.append(&mut loop_edges);

    // An orphan-collected placeholder may still have had outgoing edges;
    // nothing may reference a node absent from the final set.
    let live: AHashSet<&str> = final_nodes.iter().map(|n| n.id.as_str()).collect();
    let mut deleted_edge_ids = deleted_edge_ids;
    final_edges.retain(|e| {
        let valid = live.contains(e.source.as_str()) && live.contains(e.target.as_str());
        if !valid {
            deleted_edge_ids.push(e.id.clone());
        }
        valid
    });

    LoopRebuild {
        nodes: final_nodes,
        edges: final_edges,
        deleted_node_ids: nodes_to_delete.into_iter().collect(),
        deleted_edge_ids,
    }
}
