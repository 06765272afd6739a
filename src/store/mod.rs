//! The graph state store.
//!
//! [`GraphStore`] owns the canonical node/edge collections behind a workflow
//! canvas, keeps every record's sync state against the last persisted
//! snapshot, and exposes the full set of graph mutations. Each operation
//! reads the pre-operation state, computes its replacement collections, and
//! commits them in one step; partial writes are never observable.
//!
//! Mutations on unknown ids are deliberate no-ops (logged at debug level):
//! the renderer can deliver stale callbacks after a deletion, and erroring
//! would force every caller to handle a race it cannot prevent.

mod changes;
mod update;

pub use changes::{Connection, EdgeChange, NodeChange};
pub use update::{NodeUpdate, UpdateOutcome};

use ahash::AHashSet;
use itertools::Itertools;
use log::debug;

use crate::document::{to_external_edge, to_external_node, ChangeSet};
use crate::graph::{
    mint_id, EdgeId, LoopRole, NodeId, NodeType, Position, SyncState, WorkflowEdge, WorkflowNode,
    HANDLE_NONE,
};
use crate::registry;
use crate::topology::{self, ConnectedHandles, EdgeSpec};

/// Seed data for placeholder successor nodes, supplied by the host
/// application (display name and the template the picker opens with).
#[derive(Debug, Clone)]
pub struct PlaceholderTemplate {
    pub name: String,
    pub node_type: NodeType,
    pub template_id: Option<String>,
}

impl Default for PlaceholderTemplate {
    fn default() -> Self {
        Self {
            name: String::new(),
            node_type: NodeType::VoidNode,
            template_id: None,
        }
    }
}

/// An immutable capture of the whole graph state, returned by type-changing
/// updates so the caller can undo the retype. Apply with
/// [`GraphStore::restore`]; dropping the value forgets the undo.
#[derive(Debug, Clone)]
pub struct GraphSnapshot {
    nodes: Vec<WorkflowNode>,
    edges: Vec<WorkflowEdge>,
    deleted_node_ids: AHashSet<NodeId>,
    deleted_edge_ids: AHashSet<EdgeId>,
    active_node: Option<NodeId>,
}

/// The central mutable state container for one workflow version.
#[derive(Debug, Default)]
pub struct GraphStore {
    nodes: Vec<WorkflowNode>,
    edges: Vec<WorkflowEdge>,
    /// Previously-persisted ids removed locally, per entity kind.
    deleted_node_ids: AHashSet<NodeId>,
    deleted_edge_ids: AHashSet<EdgeId>,
    /// Derived occupied-handle map, recomputed on every edge mutation.
    connected: ConnectedHandles,
    active_node: Option<NodeId>,
    version_id: Option<String>,
    placeholder: PlaceholderTemplate,
    /// Node id of the drag in progress, if the dragged node is persisted.
    drag: Option<NodeId>,
}

impl GraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub fn nodes(&self) -> &[WorkflowNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[WorkflowEdge] {
        &self.edges
    }

    pub fn find_node(&self, id: &str) -> Option<&WorkflowNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn find_edge(&self, id: &str) -> Option<&WorkflowEdge> {
        self.edges.iter().find(|e| e.id == id)
    }

    /// Occupied output handles per node; the renderer hides the "add"
    /// affordance for handles present here.
    pub fn connected_handles(&self) -> &ConnectedHandles {
        &self.connected
    }

    pub fn active_node(&self) -> Option<&WorkflowNode> {
        self.active_node.as_deref().and_then(|id| self.find_node(id))
    }

    /// Focuses a node for configuration. UI focus only; the graph is not
    /// touched.
    pub fn set_active_node(&mut self, id: Option<NodeId>) {
        self.active_node = id;
    }

    pub fn current_version(&self) -> Option<&str> {
        self.version_id.as_deref()
    }

    /// Sets the version id stamped onto newly synthesized nodes and edges.
    pub fn set_current_version(&mut self, version_id: Option<String>) {
        self.version_id = version_id;
    }

    pub fn set_placeholder_template(&mut self, template: PlaceholderTemplate) {
        self.placeholder = template;
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Replaces the whole graph with backend state. Every record becomes
    /// `Synced` and all deletion tracking is cleared. Safe to call repeatedly,
    /// e.g. on a version switch.
    pub fn initialize_from_backend(
        &mut self,
        mut nodes: Vec<WorkflowNode>,
        mut edges: Vec<WorkflowEdge>,
    ) {
        for node in &mut nodes {
            node.sync = SyncState::Synced;
        }
        for edge in &mut edges {
            edge.sync = SyncState::Synced;
        }
        self.connected = topology::connected_handles(&edges, None);
        self.nodes = nodes;
        self.edges = edges;
        self.deleted_node_ids.clear();
        self.deleted_edge_ids.clear();
        self.active_node = None;
        self.drag = None;
    }

    pub fn clear_all(&mut self) {
        self.nodes.clear();
        self.edges.clear();
        self.connected.clear();
        self.deleted_node_ids.clear();
        self.deleted_edge_ids.clear();
        self.active_node = None;
        self.drag = None;
    }

    // ------------------------------------------------------------------
    // Sync tracking
    // ------------------------------------------------------------------

    /// Computes the minimal change-set against the last persisted snapshot,
    /// or `None` when nothing differs. Created entities come before updated
    /// ones; deletion lists are sorted for stable output.
    pub fn get_changes_for_sync(&self) -> Option<ChangeSet> {
        let clean = self.deleted_node_ids.is_empty()
            && self.deleted_edge_ids.is_empty()
            && self.nodes.iter().all(|n| n.sync == SyncState::Synced)
            && self.edges.iter().all(|e| e.sync == SyncState::Synced);
        if clean {
            return None;
        }

        let nodes = self
            .nodes
            .iter()
            .filter(|n| n.sync == SyncState::New)
            .chain(self.nodes.iter().filter(|n| n.sync == SyncState::Dirty))
            .map(to_external_node)
            .collect();
        let edges = self
            .edges
            .iter()
            .filter(|e| e.sync == SyncState::New)
            .chain(self.edges.iter().filter(|e| e.sync == SyncState::Dirty))
            .map(to_external_edge)
            .collect();

        Some(ChangeSet {
            nodes,
            edges,
            deleted_nodes: self.deleted_node_ids.iter().cloned().sorted().collect(),
            deleted_edges: self.deleted_edge_ids.iter().cloned().sorted().collect(),
        })
    }

    /// Declares the current state persisted. Call only after the backend has
    /// confirmed the change-set produced by [`Self::get_changes_for_sync`].
    pub fn mark_as_synced(&mut self) {
        for node in &mut self.nodes {
            node.sync = SyncState::Synced;
        }
        for edge in &mut self.edges {
            edge.sync = SyncState::Synced;
        }
        self.deleted_node_ids.clear();
        self.deleted_edge_ids.clear();
    }

    /// Whether any local state differs from the last persisted snapshot.
    pub fn is_dirty(&self) -> bool {
        !self.deleted_node_ids.is_empty()
            || !self.deleted_edge_ids.is_empty()
            || self.nodes.iter().any(|n| n.sync != SyncState::Synced)
            || self.edges.iter().any(|e| e.sync != SyncState::Synced)
    }

    /// Captures the full graph state for later [`Self::restore`].
    pub(crate) fn snapshot(&self) -> GraphSnapshot {
        GraphSnapshot {
            nodes: self.nodes.clone(),
            edges: self.edges.clone(),
            deleted_node_ids: self.deleted_node_ids.clone(),
            deleted_edge_ids: self.deleted_edge_ids.clone(),
            active_node: self.active_node.clone(),
        }
    }

    /// Restores a previously captured snapshot wholesale, undoing every
    /// mutation since it was taken.
    pub fn restore(&mut self, snapshot: GraphSnapshot) {
        self.connected = topology::connected_handles(&snapshot.edges, None);
        self.nodes = snapshot.nodes;
        self.edges = snapshot.edges;
        self.deleted_node_ids = snapshot.deleted_node_ids;
        self.deleted_edge_ids = snapshot.deleted_edge_ids;
        self.active_node = snapshot.active_node;
    }

    /// Records a node id as deleted if the backend knows it.
    fn track_node_deleted(&mut self, id: &str) {
        if self
            .nodes
            .iter()
            .any(|n| n.id == id && n.sync.is_persisted())
        {
            self.deleted_node_ids.insert(id.to_string());
        }
    }

    /// Records an edge id as deleted if the backend knows it.
    fn track_edge_deleted(&mut self, id: &str) {
        if self
            .edges
            .iter()
            .any(|e| e.id == id && e.sync.is_persisted())
        {
            self.deleted_edge_ids.insert(id.to_string());
        }
    }

    pub(crate) fn mark_node_dirty(&mut self, id: &str) {
        if let Some(node) = self.nodes.iter_mut().find(|n| n.id == id) {
            node.sync.taint();
        }
    }

    fn recompute_connected(&mut self) {
        self.connected = topology::connected_handles(&self.edges, Some(&self.nodes));
    }

    // ------------------------------------------------------------------
    // Renderer change batches
    // ------------------------------------------------------------------

    /// Merges a batch of renderer node deltas. Position frames do not taint
    /// sync state (the drag handlers do, once, on drag stop); removals also
    /// purge edges touching the removed node so no dangling edge survives.
    pub fn apply_node_changes(&mut self, changes: &[NodeChange]) {
        for change in changes {
            match change {
                NodeChange::Position { id, position } => {
                    if let Some(node) = self.nodes.iter_mut().find(|n| n.id == *id) {
                        node.position = *position;
                    }
                }
                NodeChange::Select { id, selected } => {
                    if let Some(node) = self.nodes.iter_mut().find(|n| n.id == *id) {
                        node.selected = *selected;
                    }
                }
                NodeChange::Remove { id } => {
                    let touching: Vec<EdgeId> = self
                        .edges
                        .iter()
                        .filter(|e| e.touches(id))
                        .map(|e| e.id.clone())
                        .collect();
                    for edge_id in &touching {
                        self.track_edge_deleted(edge_id);
                    }
                    self.track_node_deleted(id);
                    self.edges.retain(|e| !e.touches(id));
                    self.nodes.retain(|n| n.id != *id);
                    if self.active_node.as_deref() == Some(id.as_str()) {
                        self.active_node = None;
                    }
                }
            }
        }
        self.recompute_connected();
    }

    /// Merges a batch of renderer edge deltas, then re-validates that every
    /// surviving edge still references live nodes; stragglers from
    /// out-of-order removal batches are dropped.
    pub fn apply_edge_changes(&mut self, changes: &[EdgeChange]) {
        for change in changes {
            match change {
                EdgeChange::Select { id, selected } => {
                    if let Some(edge) = self.edges.iter_mut().find(|e| e.id == *id) {
                        edge.selected = *selected;
                    }
                }
                EdgeChange::Remove { id } => {
                    self.track_edge_deleted(id);
                    self.edges.retain(|e| e.id != *id);
                }
            }
        }

        let live: AHashSet<&str> = self.nodes.iter().map(|n| n.id.as_str()).collect();
        let dangling: Vec<EdgeId> = self
            .edges
            .iter()
            .filter(|e| !live.contains(e.source.as_str()) || !live.contains(e.target.as_str()))
            .map(|e| e.id.clone())
            .collect();
        for id in &dangling {
            self.track_edge_deleted(id);
        }
        if !dangling.is_empty() {
            debug!("dropping {} dangling edge(s)", dangling.len());
            self.edges
                .retain(|e| !dangling.iter().any(|id| *id == e.id));
        }
        self.recompute_connected();
    }

    // ------------------------------------------------------------------
    // Drag discipline
    // ------------------------------------------------------------------

    /// Drag frames must not flood the dirty tracking; only the final position
    /// transition on drag stop taints the node, and only if it was persisted.
    pub fn on_node_drag_start(&mut self, _id: &str) {
        self.drag = None;
    }

    pub fn on_node_drag(&mut self, id: &str) {
        if self.drag.is_some() {
            return;
        }
        if self
            .nodes
            .iter()
            .any(|n| n.id == id && n.sync.is_persisted())
        {
            self.drag = Some(id.to_string());
        }
    }

    pub fn on_node_drag_stop(&mut self, id: &str) {
        if self.drag.take().is_some() {
            self.mark_node_dirty(id);
        }
    }

    // ------------------------------------------------------------------
    // Edge operations
    // ------------------------------------------------------------------

    /// Appends a pre-built edge. Prefer [`Self::connect`] for renderer
    /// gestures; this exists for hosts that synthesize edges themselves.
    pub fn add_edge(&mut self, mut edge: WorkflowEdge) {
        edge.sync = SyncState::New;
        if edge.version_id.is_none() {
            edge.version_id = self.version_id.clone();
        }
        self.edges.push(edge);
        self.recompute_connected();
    }

    /// Removes an edge by id, tracking the deletion.
    pub fn delete_edge(&mut self, edge_id: &str) -> bool {
        if self.find_edge(edge_id).is_none() {
            debug!("delete_edge: unknown edge {edge_id}");
            return false;
        }
        self.track_edge_deleted(edge_id);
        self.edges.retain(|e| e.id != edge_id);
        self.recompute_connected();
        true
    }

    /// Handles a connect gesture. Refuses the connection when either endpoint
    /// is missing or the source handle is already occupied (one edge per
    /// non-fan-out handle; a loop's body handle legitimately fans out).
    pub fn connect(&mut self, connection: &Connection) -> Option<EdgeId> {
        let source = self.find_node(&connection.source)?;
        self.find_node(&connection.target)?;

        let handle = connection
            .source_handle
            .clone()
            .unwrap_or_else(|| HANDLE_NONE.to_string());
        let fan_out = registry::self_loop_handle(source.node_type) == Some(handle.as_str());
        let occupied = self
            .connected
            .get(&connection.source)
            .is_some_and(|handles| handles.contains(&handle));
        if occupied && !fan_out {
            debug!(
                "connect: handle {handle} on {} already occupied",
                connection.source
            );
            return None;
        }

        let edge = topology::make_edge(
            &self.nodes,
            self.version_id.as_deref(),
            EdgeSpec {
                source: connection.source.clone(),
                target: connection.target.clone(),
                source_handle: Some(handle),
                target_handle: connection.target_handle.clone(),
                ..EdgeSpec::default()
            },
        );
        let id = edge.id.clone();
        self.edges.push(edge);
        self.recompute_connected();
        Some(id)
    }

    // ------------------------------------------------------------------
    // Node factories and insertion
    // ------------------------------------------------------------------

    /// Builds (but does not insert) a fresh placeholder node from the
    /// configured template.
    pub fn new_placeholder_node(&self, position: Position) -> WorkflowNode {
        let mut node = WorkflowNode::new(mint_id(), self.placeholder.node_type, position);
        node.name = self.placeholder.name.clone();
        node.template_id = self.placeholder.template_id.clone();
        node.version_id = self.version_id.clone();
        node.outputs = registry::outputs_for(&node);
        node
    }

    /// Appends a placeholder successor after `source_id`, replacing any edge
    /// already leaving `(source_id, source_handle)`. Trigger placeholders are
    /// left unwired: triggers may not have incoming edges.
    pub fn add_node_after(
        &mut self,
        source_id: &str,
        position: Position,
        source_handle: Option<&str>,
    ) -> Option<NodeId> {
        if self.find_node(source_id).is_none() {
            debug!("add_node_after: unknown source {source_id}");
            return None;
        }
        let handle = source_handle.unwrap_or(HANDLE_NONE);
        let new_node = self.new_placeholder_node(position);
        let new_id = new_node.id.clone();

        let replaced: Vec<EdgeId> = self
            .edges
            .iter()
            .filter(|e| e.source == source_id && e.source_handle == handle)
            .map(|e| e.id.clone())
            .collect();
        for id in &replaced {
            self.track_edge_deleted(id);
        }
        self.edges
            .retain(|e| !(e.source == source_id && e.source_handle == handle));

        let wire = !new_node.node_type.is_trigger();
        self.nodes.push(new_node);
        if wire {
            let target_handle =
                registry::target_handle_for(self.placeholder.node_type).to_string();
            let edge = topology::make_edge(
                &self.nodes,
                self.version_id.as_deref(),
                EdgeSpec::between(source_id, new_id.clone())
                    .with_source_handle(handle)
                    .with_target_handle(target_handle),
            );
            self.edges.push(edge);
        }
        self.recompute_connected();
        Some(new_id)
    }

    /// Splits an edge by inserting a placeholder node, classifying the two
    /// replacement edges from the split edge's loop context: a self-loop
    /// split becomes loop-child + loop-back, a loop-back split keeps the
    /// loop-back on the downstream half.
    pub fn add_node_between(&mut self, position: Position, edge_id: &str) -> Option<NodeId> {
        let Some(split_edge) = self.find_edge(edge_id).cloned() else {
            debug!("add_node_between: unknown edge {edge_id}");
            return None;
        };
        let source_node = self.find_node(&split_edge.source)?.clone();
        self.find_node(&split_edge.target)?;

        let is_self_loop = split_edge.source == split_edge.target;
        let is_loop_back = split_edge.loop_role == Some(LoopRole::LoopBack);

        let parent_loop = if is_self_loop && source_node.node_type == NodeType::Loop {
            Some(source_node.id.clone())
        } else {
            source_node.parent_loop.clone()
        };

        let mut new_node = self.new_placeholder_node(position);
        new_node.parent_loop = parent_loop.clone();
        let new_id = new_node.id.clone();

        self.track_edge_deleted(edge_id);
        self.edges.retain(|e| e.id != edge_id);

        if new_node.node_type.is_trigger() {
            self.nodes.push(new_node);
            self.recompute_connected();
            return Some(new_id);
        }

        // Upstream half inherits the split edge's context.
        let upstream_role = if is_self_loop {
            Some(LoopRole::LoopChild)
        } else if is_loop_back {
            None
        } else {
            split_edge.loop_role
        };
        // Downstream half takes over closing the loop, if there was one.
        let downstream_role = if is_self_loop || is_loop_back {
            Some(LoopRole::LoopBack)
        } else {
            None
        };

        let target_handle = registry::target_handle_for(new_node.node_type).to_string();
        let primary_output = new_node
            .outputs
            .first()
            .cloned()
            .unwrap_or_else(|| HANDLE_NONE.to_string());
        self.nodes.push(new_node);

        let upstream = topology::make_edge(
            &self.nodes,
            self.version_id.as_deref(),
            EdgeSpec {
                source: split_edge.source.clone(),
                target: new_id.clone(),
                source_handle: Some(split_edge.source_handle.clone()),
                target_handle: Some(target_handle),
                loop_role: upstream_role,
                group_id: parent_loop.clone().or_else(|| split_edge.group_id.clone()),
                expression: split_edge.expression.clone(),
                id: None,
            },
        );
        let downstream = topology::make_edge(
            &self.nodes,
            self.version_id.as_deref(),
            EdgeSpec {
                source: new_id.clone(),
                target: split_edge.target.clone(),
                source_handle: Some(primary_output),
                target_handle: Some(split_edge.target_handle.clone()),
                loop_role: downstream_role,
                group_id: parent_loop,
                expression: None,
                id: None,
            },
        );
        self.edges.push(upstream);
        self.edges.push(downstream);
        self.recompute_connected();
        Some(new_id)
    }

    // ------------------------------------------------------------------
    // Deletion
    // ------------------------------------------------------------------

    /// Removes a node and repairs the surrounding topology.
    ///
    /// Deleting a loop controller tears down its whole loop-back structure
    /// without reconnecting anything. Deleting an ordinary node reconnects
    /// its incoming edges to the target of its "best" outgoing edge —
    /// priority: a `true` handle, then `default`, then the first declared
    /// output, then simply the first edge — and garbage-collects placeholder
    /// targets of the abandoned branches.
    pub fn delete_node(&mut self, node_id: &str) -> bool {
        let Some(node) = self.find_node(node_id).cloned() else {
            debug!("delete_node: unknown node {node_id}");
            return false;
        };
        if self.active_node.as_deref() == Some(node_id) {
            self.active_node = None;
        }

        let incoming: Vec<WorkflowEdge> = self
            .edges
            .iter()
            .filter(|e| e.target == node_id)
            .cloned()
            .collect();
        let outgoing: Vec<WorkflowEdge> = self
            .edges
            .iter()
            .filter(|e| e.source == node_id)
            .cloned()
            .collect();

        let mut removed_edge_ids: AHashSet<EdgeId> = incoming
            .iter()
            .chain(outgoing.iter())
            .map(|e| e.id.clone())
            .collect();
        let mut removed_node_ids: AHashSet<NodeId> = AHashSet::new();
        removed_node_ids.insert(node_id.to_string());

        let mut updated_edges: Vec<WorkflowEdge> = self
            .edges
            .iter()
            .filter(|e| !e.touches(node_id))
            .cloned()
            .collect();

        // A loop controller takes its whole loop-back structure with it: the
        // closing edges from its children all target the controller and sit
        // in the removal set already. Only ordinary nodes reconnect.
        if node.node_type != NodeType::Loop {
            let best_outgoing = outgoing
                .iter()
                .find(|e| e.source_handle == "true")
                .or_else(|| outgoing.iter().find(|e| e.source_handle == "default"))
                .or_else(|| {
                    node.outputs.first().and_then(|first| {
                        outgoing.iter().find(|e| {
                            e.source_handle == *first
                                || e.source_handle == first.to_lowercase()
                        })
                    })
                })
                .or_else(|| outgoing.first())
                .cloned();

            if let Some(best) = &best_outgoing {
                // Bridge every upstream edge over the removed node.
                for in_edge in &incoming {
                    let role = if in_edge.source == best.target {
                        Some(LoopRole::SelfLoop)
                    } else if best.loop_role == Some(LoopRole::LoopBack) {
                        Some(LoopRole::LoopBack)
                    } else {
                        in_edge.loop_role
                    };
                    let bridged = topology::make_edge(
                        &self.nodes,
                        self.version_id.as_deref(),
                        EdgeSpec {
                            source: in_edge.source.clone(),
                            target: best.target.clone(),
                            source_handle: Some(in_edge.source_handle.clone()),
                            target_handle: Some(best.target_handle.clone()),
                            loop_role: role,
                            group_id: in_edge.group_id.clone(),
                            expression: in_edge.expression.clone(),
                            id: None,
                        },
                    );
                    updated_edges.push(bridged);
                }

                // Abandoned branches: other outgoing edges die, and so do
                // their placeholder targets when nothing else feeds them.
                for abandoned in outgoing.iter().filter(|e| e.id != best.id) {
                    let Some(target) = self.find_node(&abandoned.target) else {
                        continue;
                    };
                    if target.node_type != NodeType::VoidNode {
                        continue;
                    }
                    let has_other_input = self
                        .edges
                        .iter()
                        .any(|e| e.target == target.id && e.source != node_id);
                    if has_other_input {
                        continue;
                    }
                    removed_node_ids.insert(target.id.clone());
                    let target_id = target.id.clone();
                    for edge in self.edges.iter().filter(|e| e.touches(&target_id)) {
                        removed_edge_ids.insert(edge.id.clone());
                    }
                    updated_edges.retain(|e| !e.touches(&target_id));
                }
            }
        }

        // Track deletions against pre-commit records, then commit once.
        for id in &removed_edge_ids {
            self.track_edge_deleted(id);
        }
        for id in &removed_node_ids {
            self.track_node_deleted(id);
        }

        self.nodes.retain(|n| !removed_node_ids.contains(&n.id));
        let live: AHashSet<&str> = self.nodes.iter().map(|n| n.id.as_str()).collect();
        updated_edges.retain(|e| live.contains(e.source.as_str()) && live.contains(e.target.as_str()));
        self.edges = updated_edges;
        self.recompute_connected();
        true
    }

    // ------------------------------------------------------------------
    // Simple updates
    // ------------------------------------------------------------------

    /// Renames a node in place.
    pub fn rename_node(&mut self, node_id: &str, name: impl Into<String>) -> bool {
        let Some(node) = self.nodes.iter_mut().find(|n| n.id == node_id) else {
            debug!("rename_node: unknown node {node_id}");
            return false;
        };
        node.name = name.into();
        node.sync.taint();
        true
    }

    /// Replaces the node collection wholesale, tainting every persisted
    /// record in the replacement. For host-driven bulk layout changes.
    pub fn set_nodes(&mut self, mut nodes: Vec<WorkflowNode>) {
        for node in &mut nodes {
            node.sync.taint();
        }
        self.nodes = nodes;
    }

    /// Replaces the edge collection wholesale.
    pub fn set_edges(&mut self, edges: Vec<WorkflowEdge>) {
        self.edges = edges;
        self.recompute_connected();
    }
}
