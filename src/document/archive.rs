//! Local draft persistence for workflow documents.
//!
//! Hosts use this to cache unsaved drafts (crash recovery, offline editing)
//! without involving the backend. Documents carry open JSON configuration
//! objects, so the on-disk format is JSON as well.

use std::fs;
use std::io::{Read, Write};

use super::external::WorkflowDocument;
use crate::error::ArchiveError;

impl WorkflowDocument {
    /// Saves the document to a file.
    pub fn save(&self, path: &str) -> Result<(), ArchiveError> {
        let bytes = serde_json::to_vec(self)
            .map_err(|e| ArchiveError::Generic(format!("Serialization failed: {}", e)))?;
        let mut file = fs::File::create(path).map_err(|e| {
            ArchiveError::Generic(format!("Could not create file '{}': {}", path, e))
        })?;
        file.write_all(&bytes).map_err(|e| {
            ArchiveError::Generic(format!("Could not write to file '{}': {}", path, e))
        })?;
        Ok(())
    }

    /// Loads a document from a file.
    pub fn from_file(path: &str) -> Result<Self, ArchiveError> {
        let mut file = fs::File::open(path)
            .map_err(|e| ArchiveError::Generic(format!("Could not open file '{}': {}", path, e)))?;
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes).map_err(|e| {
            ArchiveError::Generic(format!("Could not read from file '{}': {}", path, e))
        })?;
        Self::from_bytes(&bytes)
    }

    /// Deserializes a document from a byte slice.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ArchiveError> {
        serde_json::from_slice(bytes)
            .map_err(|e| ArchiveError::Generic(format!("Deserialization failed: {}", e)))
    }
}
