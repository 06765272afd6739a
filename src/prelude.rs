//! Prelude module for convenient imports
//!
//! Re-exports the most commonly used types from the keiro crate. Import this
//! module to get access to the core functionality without having to import
//! each type individually.

// The store and its operation inputs
pub use crate::store::{
    Connection, EdgeChange, GraphSnapshot, GraphStore, NodeChange, NodeUpdate, PlaceholderTemplate,
    UpdateOutcome,
};

// Graph model types
pub use crate::graph::{
    LoopMode, LoopRole, NodeConfig, NodeType, Position, SwitchCase, SyncState, WorkflowEdge,
    WorkflowNode,
};

// Persistence boundary
pub use crate::document::{
    handle_to_condition, import_document, to_external_edge, to_external_node, ChangeSet,
    ExternalEdge, ExternalNode, WorkflowDocument,
};

// Registry and topology helpers
pub use crate::registry::{definition_for, outputs_for, NodeDefinition};
pub use crate::topology::{connected_handles, edge_label, make_edge, EdgeSpec};

// Error types
pub use crate::error::{ArchiveError, DocumentError};
