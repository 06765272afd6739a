use serde::{Deserialize, Serialize};
use std::fmt;

use super::node::{NodeId, SyncState};

/// Unique identifier for an edge. Opaque to the engine; minted as UUIDv4 text.
pub type EdgeId = String;

/// Default source handle for single-output nodes.
pub const HANDLE_NONE: &str = "none";
/// Default input handle for single-input nodes.
pub const HANDLE_INPUT: &str = "input";
/// The loop controller's body handle; carries the self edge and body children.
pub const HANDLE_BODY: &str = "body";
/// The loop controller's exit handle.
pub const HANDLE_END: &str = "end";

/// The role an edge plays in loop topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LoopRole {
    /// The loop controller's own `body -> body` edge.
    #[serde(rename = "self")]
    SelfLoop,
    /// Carries control from a loop controller into its first body node.
    LoopChild,
    /// Returns control from the last body node to its owning controller.
    LoopBack,
    /// Leaves a loop for the outside graph.
    End,
}

impl fmt::Display for LoopRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LoopRole::SelfLoop => "self",
            LoopRole::LoopChild => "loop-child",
            LoopRole::LoopBack => "loop-back",
            LoopRole::End => "end",
        };
        f.write_str(name)
    }
}

/// A directed, labeled arc between two live nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowEdge {
    pub id: EdgeId,
    pub source: NodeId,
    pub target: NodeId,
    /// Name of the source output port; `"none"` for single-output nodes.
    pub source_handle: String,
    /// Name of the target input port; `"input"` for single-input nodes.
    pub target_handle: String,
    /// Display label derived from the source node's definition.
    #[serde(default)]
    pub label: Option<String>,
    /// Loop-topology classification; `None` for plain sequential edges.
    #[serde(default)]
    pub loop_role: Option<LoopRole>,
    /// Id of the loop controller owning this edge's looping context.
    #[serde(default)]
    pub group_id: Option<NodeId>,
    /// Literal condition text for switch-case branches.
    #[serde(default)]
    pub expression: Option<String>,
    #[serde(default)]
    pub version_id: Option<String>,
    #[serde(skip)]
    pub selected: bool,
    #[serde(skip)]
    pub sync: SyncState,
}

impl WorkflowEdge {
    /// Whether this edge closes or starts a loop body (as opposed to plain
    /// sequential control flow).
    pub fn is_loop_edge(&self) -> bool {
        self.loop_role.is_some()
    }

    pub fn touches(&self, node_id: &str) -> bool {
        self.source == node_id || self.target == node_id
    }
}
