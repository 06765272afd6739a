//! The `update_node` pipeline.
//!
//! A node update runs through named stages — retype identity, output
//! recomputation, type-specific topology, commit — each computed from the
//! pre-operation snapshot. A type change is an identity change: the old id
//! leaves the graph (tracked as deleted) and a fresh id takes its place, so
//! persisted ids are never silently reused for a different node kind.

use log::debug;

use super::{GraphSnapshot, GraphStore};
use crate::graph::{
    mint_id, EdgeId, NodeConfig, NodeId, NodeType, Position, SyncState, WorkflowEdge, WorkflowNode,
};
use crate::registry;
use crate::topology::{edge_label, normalize_handle, rebuild_loop_topology};

/// A partial node update from the configuration UI. Omitted fields keep
/// their current values.
#[derive(Debug, Clone, Default)]
pub struct NodeUpdate {
    pub node_type: Option<NodeType>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub config: Option<NodeConfig>,
}

impl NodeUpdate {
    pub fn retype(node_type: NodeType) -> Self {
        Self {
            node_type: Some(node_type),
            ..Self::default()
        }
    }

    pub fn with_config(mut self, config: NodeConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Result of a node update.
#[derive(Debug)]
pub struct UpdateOutcome {
    /// The node's id after the update; differs from the input id when the
    /// type changed.
    pub node_id: NodeId,
    /// Pre-mutation state, present only for type-changing updates. Pass to
    /// [`GraphStore::restore`] to fully undo the retype (original node id
    /// included); drop it to keep the change.
    pub rollback: Option<GraphSnapshot>,
}

impl GraphStore {
    /// Applies a partial update to a node, restructuring surrounding topology
    /// as the new type demands. Returns `None` for unknown ids.
    ///
    /// A retype mints a new node id and rewires edges whose handles survive
    /// the new output set; branch types synthesize placeholder children for
    /// unconnected outputs, trigger types shed incoming edges, and a loop
    /// conversion delegates to the loop topology builder outright.
    pub fn update_node(&mut self, node_id: &str, update: NodeUpdate) -> Option<UpdateOutcome> {
        let Some(old) = self.find_node(node_id).cloned() else {
            debug!("update_node: unknown node {node_id}");
            return None;
        };

        let new_type = update.node_type.unwrap_or(old.node_type);
        let type_changed = new_type != old.node_type;
        let rollback = type_changed.then(|| self.snapshot());

        // --- RetypeIdentity ----------------------------------------------
        let mut merged = old.clone();
        merged.node_type = new_type;
        if let Some(name) = update.name {
            merged.name = name;
        }
        if let Some(description) = update.description {
            merged.description = description;
        }
        if let Some(config) = update.config {
            merged.config = config;
        }
        if type_changed {
            merged.id = mint_id();
            merged.sync = SyncState::New;
        }

        // --- RecomputeOutputs --------------------------------------------
        merged.outputs = registry::outputs_for(&merged);

        if type_changed {
            self.track_node_deleted(node_id);
        } else {
            // The merged clone replaces the record at commit; taint it, not
            // the record it supersedes.
            merged.sync.taint();
        }

        // --- ApplyTypeSpecificTopology -----------------------------------
        if new_type == NodeType::Loop && type_changed {
            return Some(self.commit_loop_conversion(merged, node_id, rollback));
        }

        let mut edges = self.edges.clone();

        // Triggers are graph roots; whatever pointed at this node is cut.
        if new_type.is_trigger() {
            let stripped: Vec<EdgeId> = edges
                .iter()
                .filter(|e| e.target == node_id)
                .map(|e| e.id.clone())
                .collect();
            for id in &stripped {
                self.track_edge_deleted(id);
            }
            edges.retain(|e| e.target != node_id);
        }

        if type_changed {
            edges = self.rewire_for_retype(edges, node_id, &merged);
        }

        if merged.node_type.is_branching() {
            let (final_nodes, final_edges) =
                self.synthesize_branches(&old, merged.clone(), node_id, edges);
            self.commit(final_nodes, final_edges, merged.id.clone());
        } else {
            let final_nodes = replace_node(&self.nodes, node_id, &merged);
            self.commit(final_nodes, edges, merged.id.clone());
        }

        Some(UpdateOutcome {
            node_id: merged.id,
            rollback,
        })
    }

    fn commit_loop_conversion(
        &mut self,
        merged: WorkflowNode,
        old_id: &str,
        rollback: Option<GraphSnapshot>,
    ) -> UpdateOutcome {
        let merged_id = merged.id.clone();
        let rebuild = rebuild_loop_topology(
            merged,
            old_id,
            &self.nodes,
            &self.edges,
            self.version_id.as_deref(),
            |position| self.new_placeholder_node(position),
        );

        // Deletions recorded against pre-commit records, additions after:
        // a sync diff must see the two as disjoint id sets.
        for id in &rebuild.deleted_edge_ids {
            self.track_edge_deleted(id);
        }
        for id in &rebuild.deleted_node_ids {
            self.track_node_deleted(id);
        }
        self.commit(rebuild.nodes, rebuild.edges, merged_id.clone());

        UpdateOutcome {
            node_id: merged_id,
            rollback,
        }
    }

    /// Recreates edges around a retyped node under fresh ids. Incoming edges
    /// always follow the new identity; outgoing edges follow it only when
    /// their handle survives in the new output set — stale branches are
    /// deleted so the new type's own topology can take their place.
    fn rewire_for_retype(
        &mut self,
        edges: Vec<WorkflowEdge>,
        old_id: &str,
        merged: &WorkflowNode,
    ) -> Vec<WorkflowEdge> {
        let affected: Vec<EdgeId> = edges
            .iter()
            .filter(|e| e.touches(old_id))
            .map(|e| e.id.clone())
            .collect();
        for id in &affected {
            self.track_edge_deleted(id);
        }

        let surviving: Vec<String> = merged
            .outputs
            .iter()
            .map(|o| o.to_lowercase())
            .collect();

        edges
            .into_iter()
            .filter_map(|mut edge| {
                if edge.source == old_id {
                    if !surviving.contains(&edge.source_handle.to_lowercase()) {
                        return None;
                    }
                    edge.id = mint_id();
                    edge.source = merged.id.clone();
                    edge.sync = SyncState::New;
                } else if edge.target == old_id {
                    edge.id = mint_id();
                    edge.target = merged.id.clone();
                    edge.sync = SyncState::New;
                }
                Some(edge)
            })
            .collect()
    }

    /// Populates the output handles of a branching node: one placeholder
    /// child per unconnected handle, refreshed case data for switch handles
    /// that already carry an edge, and deletion of edges whose case was
    /// removed from the configuration.
    fn synthesize_branches(
        &mut self,
        old: &WorkflowNode,
        merged: WorkflowNode,
        old_id: &str,
        mut edges: Vec<WorkflowEdge>,
    ) -> (Vec<WorkflowNode>, Vec<WorkflowEdge>) {
        let is_switch = merged.node_type == NodeType::Switch;
        let x = old.position.x;
        let y = old.position.y;

        // Cases dropped from a switch configuration take their edges along.
        let removed_cases: Vec<String> = old
            .config
            .switch_cases()
            .unwrap_or_default()
            .iter()
            .map(|case| case.condition.clone())
            .filter(|condition| {
                !merged
                    .config
                    .switch_cases()
                    .unwrap_or_default()
                    .iter()
                    .any(|case| case.condition == *condition)
            })
            .collect();
        if !removed_cases.is_empty() {
            let doomed: Vec<EdgeId> = edges
                .iter()
                .filter(|e| {
                    (e.source == merged.id || e.source == old_id)
                        && removed_cases.contains(&e.source_handle)
                })
                .map(|e| e.id.clone())
                .collect();
            for id in &doomed {
                self.track_edge_deleted(id);
            }
            edges.retain(|e| !doomed.contains(&e.id));
        }

        let branch_names: Vec<String> = if is_switch {
            merged.outputs.clone()
        } else {
            merged.outputs.iter().map(|o| o.to_lowercase()).collect()
        };
        let total = branch_names.len();

        let mut branch_nodes: Vec<WorkflowNode> = Vec::new();
        let mut branch_edges: Vec<WorkflowEdge> = Vec::new();

        for (index, handle) in branch_names.iter().enumerate() {
            let normalized = handle.to_lowercase();
            let connected = edges
                .iter()
                .any(|e| {
                    (e.source == merged.id || e.source == old_id)
                        && e.source_handle == normalized
                });

            if connected {
                if is_switch {
                    refresh_case_edges(&merged, old_id, &normalized, &mut edges);
                }
                continue;
            }

            let offset_y = branch_offset(index, total, &normalized, is_switch);
            let child = self.new_placeholder_node(Position::new(x + 250.0, y + offset_y));

            let case = merged
                .config
                .switch_cases()
                .unwrap_or_default()
                .iter()
                .find(|case| case.condition == normalized)
                .cloned();

            branch_edges.push(WorkflowEdge {
                id: mint_id(),
                source: merged.id.clone(),
                target: child.id.clone(),
                source_handle: normalized.clone(),
                target_handle: "input".to_string(),
                label: edge_label(&normalized),
                loop_role: None,
                group_id: None,
                expression: case.map(|case| case.expression),
                version_id: self.version_id.clone(),
                selected: false,
                sync: SyncState::New,
            });
            branch_nodes.push(child);
        }

        let mut final_nodes = replace_node(&self.nodes, old_id, &merged);
        final_nodes.append(&mut branch_nodes);
        edges.append(&mut branch_edges);
        (final_nodes, edges)
    }

    fn commit(&mut self, nodes: Vec<WorkflowNode>, edges: Vec<WorkflowEdge>, active: NodeId) {
        self.nodes = nodes;
        self.edges = edges;
        self.recompute_connected();
        self.set_active_node(Some(active));
    }
}

/// Vertical placement of branch children: conditional true/false pairs sit at
/// a fixed ±100 offset, switch cases fan evenly in 140px steps.
fn branch_offset(index: usize, total: usize, handle: &str, is_switch: bool) -> f64 {
    if !is_switch {
        match normalize_handle(handle).as_str() {
            "true" => return -100.0,
            "false" => return 100.0,
            _ => {}
        }
    }
    index as f64 * 140.0 - ((total.saturating_sub(1)) as f64 * 140.0) / 2.0
}

/// Re-stamps case data onto the edges already occupying a switch handle.
fn refresh_case_edges(
    merged: &WorkflowNode,
    old_id: &str,
    handle: &str,
    edges: &mut [WorkflowEdge],
) {
    let Some(case) = merged
        .config
        .switch_cases()
        .unwrap_or_default()
        .iter()
        .find(|case| case.condition == handle)
        .cloned()
    else {
        return;
    };

    for edge in edges
        .iter_mut()
        .filter(|e| (e.source == merged.id || e.source == old_id) && e.source_handle == handle)
    {
        edge.expression = Some(case.expression.clone());
        edge.sync.taint();
    }
}

fn replace_node(nodes: &[WorkflowNode], old_id: &str, merged: &WorkflowNode) -> Vec<WorkflowNode> {
    nodes
        .iter()
        .map(|n| if n.id == old_id { merged.clone() } else { n.clone() })
        .collect()
}
