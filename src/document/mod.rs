//! The persistence boundary: wire shapes, document import, change-set export,
//! and local draft archiving.

mod archive;
mod export;
mod external;
mod import;

pub use export::{handle_to_condition, to_external_edge, to_external_node};
pub use external::{ChangeSet, ExternalEdge, ExternalNode, WorkflowDocument};
pub use import::import_document;
