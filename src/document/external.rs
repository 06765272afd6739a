use serde::{Deserialize, Serialize};

use crate::graph::Position;

/// A node in the persistence shape.
///
/// `node_type` stays a plain string on the wire so documents written by newer
/// backends still load; [`crate::document::import_document`] maps it into the
/// closed [`crate::graph::NodeType`] set and reports what it cannot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalNode {
    pub id: String,
    #[serde(default)]
    pub version_id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type")]
    pub node_type: String,
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub template_id: String,
    #[serde(default)]
    pub config: serde_json::Value,
    #[serde(default)]
    pub retry_attempts: u32,
    #[serde(default)]
    pub retry_delay_ms: u64,
    pub position: Position,
}

/// An edge in the persistence shape. `condition` is the semantic branch tag
/// (`none`, `on_true`, `on_false`, `case_N`); the visual handle names are a
/// client-side concern and are rederived on import.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalEdge {
    pub id: String,
    #[serde(default)]
    pub version_id: String,
    pub source_id: String,
    pub target_id: String,
    #[serde(default)]
    pub group_id: Option<String>,
    #[serde(default)]
    pub condition: Option<String>,
    #[serde(default)]
    pub expression: String,
}

/// A complete workflow document as the backend hands it over.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WorkflowDocument {
    #[serde(default)]
    pub nodes: Vec<ExternalNode>,
    #[serde(default)]
    pub edges: Vec<ExternalEdge>,
}

/// The minimal created/updated/deleted description needed to bring persisted
/// storage in line with local state. Produced by
/// [`crate::store::GraphStore::get_changes_for_sync`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeSet {
    /// Created and updated nodes, created first.
    pub nodes: Vec<ExternalNode>,
    /// Created and updated edges, created first.
    pub edges: Vec<ExternalEdge>,
    pub deleted_nodes: Vec<String>,
    pub deleted_edges: Vec<String>,
}

impl ChangeSet {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
            && self.edges.is_empty()
            && self.deleted_nodes.is_empty()
            && self.deleted_edges.is_empty()
    }
}
