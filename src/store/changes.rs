//! Change batches emitted by the rendering layer.
//!
//! The renderer reports interactions (drag frames, selection toggles,
//! keyboard deletions) as deltas; the store merges them into state. Removal
//! ordering between node and edge batches is not guaranteed, so edge batches
//! re-validate endpoints on application.

use serde::{Deserialize, Serialize};

use crate::graph::{EdgeId, NodeId, Position};

/// A single node delta from the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NodeChange {
    /// An intermediate or final drag position.
    Position { id: NodeId, position: Position },
    Select { id: NodeId, selected: bool },
    Remove { id: NodeId },
}

/// A single edge delta from the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EdgeChange {
    Select { id: EdgeId, selected: bool },
    Remove { id: EdgeId },
}

/// A connect gesture between two handles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    pub source: NodeId,
    pub target: NodeId,
    #[serde(default)]
    pub source_handle: Option<String>,
    #[serde(default)]
    pub target_handle: Option<String>,
}
