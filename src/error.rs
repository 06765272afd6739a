use thiserror::Error;

/// Errors that can occur while mapping a backend document into the internal
/// graph model.
///
/// Structural inconsistencies (duplicate edge ids, edges referencing missing
/// nodes) are self-healing and never reported; an unknown node type is the
/// one thing an import refuses to guess at.
#[derive(Error, Debug, Clone)]
pub enum DocumentError {
    #[error("node '{node_id}' has an unknown type: '{type_name}'")]
    UnknownNodeType { node_id: String, type_name: String },
}

/// Errors that can occur when saving or loading a local draft archive.
#[derive(Error, Debug, Clone)]
pub enum ArchiveError {
    #[error("{0}")]
    Generic(String),
}
