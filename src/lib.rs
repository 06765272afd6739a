//! # Keiro - Workflow Graph State Engine
//!
//! **Keiro** is the graph state and diff-tracking engine behind node-based
//! workflow editors. It owns the canonical node/edge graph a visual canvas
//! renders, keeps every entity's sync state against the last persisted
//! snapshot, rewires topology when nodes are added, removed, or retyped
//! (including the self-referencing edge shapes looping constructs need), and
//! computes the minimal change-set a backend must apply on save.
//!
//! ## Core Workflow
//!
//! The engine is renderer-agnostic. It consumes change events from whatever
//! draws the diagram and produces replacement collections; nothing in this
//! crate paints pixels. The primary workflow is:
//!
//! 1.  **Import**: Map the backend's workflow document into the internal
//!     graph model with `import_document`.
//! 2.  **Initialize**: Hand the collections to a `GraphStore` via
//!     `initialize_from_backend`; every record starts out synced.
//! 3.  **Mutate**: Forward canvas events (connect, drag, delete) and
//!     configuration submissions (`update_node`, `rename_node`) to the store.
//!     Each operation commits atomically and keeps the graph structurally
//!     consistent.
//! 4.  **Sync**: On save, `get_changes_for_sync` yields the created/updated/
//!     deleted sets in the persistence shape, or `None` when nothing changed.
//!     Once the backend confirms, `mark_as_synced` resets the tracking; if
//!     the save fails, simply diff again later — the dirty state accumulates.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use keiro::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Load a workflow document (e.g. fetched from your backend).
//!     let raw = std::fs::read_to_string("workflow.json")?;
//!     let document: WorkflowDocument = serde_json::from_str(&raw)?;
//!
//!     // Map it into the internal model and initialize the store.
//!     let (nodes, edges) = import_document(&document)?;
//!     let mut store = GraphStore::new();
//!     store.initialize_from_backend(nodes, edges);
//!
//!     // Mutate the graph the way a canvas would.
//!     let first = store.nodes().first().map(|n| n.id.clone()).unwrap();
//!     store.add_node_after(&first, Position::new(400.0, 120.0), None);
//!     store.rename_node(&first, "Entry point");
//!
//!     // Compute the change-set on save.
//!     if let Some(changes) = store.get_changes_for_sync() {
//!         println!(
//!             "{} node(s), {} edge(s) to upsert; {} node(s), {} edge(s) to delete",
//!             changes.nodes.len(),
//!             changes.edges.len(),
//!             changes.deleted_nodes.len(),
//!             changes.deleted_edges.len(),
//!         );
//!         // ... persist `changes`, then:
//!         store.mark_as_synced();
//!     }
//!     assert!(!store.is_dirty());
//!
//!     Ok(())
//! }
//! ```

pub mod document;
pub mod error;
pub mod graph;
pub mod prelude;
pub mod registry;
pub mod store;
pub mod topology;
