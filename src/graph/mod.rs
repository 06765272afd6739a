//! Core graph types: nodes, edges, and their sync bookkeeping.

mod edge;
mod node;

/// Mints a fresh opaque entity id.
pub(crate) fn mint_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

pub use edge::{
    EdgeId, LoopRole, WorkflowEdge, HANDLE_BODY, HANDLE_END, HANDLE_INPUT, HANDLE_NONE,
};
pub use node::{
    AuthKind, Authentication, LoopMode, MembershipInviteConfig, NodeConfig, NodeId, NodeType,
    Position, SwitchCase, SyncState, WebhookConfig, WorkflowNode,
};
