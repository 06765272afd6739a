//! Tests for the graph store's structural mutations.
mod common;
use common::*;
use keiro::prelude::*;

#[test]
fn test_delete_leaf_node() {
    let mut store = trigger_action_store();

    assert!(store.delete_node("b"));

    assert_eq!(node_ids(&store), vec!["a"]);
    assert!(store.edges().is_empty());

    let changes = store.get_changes_for_sync().expect("deletion is a change");
    assert_eq!(changes.deleted_nodes, vec!["b".to_string()]);
    assert_eq!(changes.deleted_edges, vec!["ab".to_string()]);
}

#[test]
fn test_delete_middle_node_reconnects() {
    let mut store = synced_store(
        vec![
            node("a", NodeType::Webhook, 0.0, 0.0),
            node("b", NodeType::SendEmail, 250.0, 0.0),
            node("c", NodeType::SendEmail, 500.0, 0.0),
        ],
        vec![edge("ab", "a", "b", "none"), edge("bc", "b", "c", "none")],
    );

    assert!(store.delete_node("b"));

    assert_eq!(node_ids(&store), vec!["a", "c"]);
    assert_eq!(store.edges().len(), 1);
    let bridged = edge_between(&store, "a", "c");
    assert_eq!(bridged.source_handle, "none");
    assert_ne!(bridged.id, "ab");
    assert_ne!(bridged.id, "bc");
}

#[test]
fn test_delete_prefers_true_branch_target() {
    // b has two outgoing branches; the true branch wins the reconnection.
    let mut store = synced_store(
        vec![
            node("a", NodeType::Webhook, 0.0, 0.0),
            node("b", NodeType::Conditional, 250.0, 0.0),
            node("c", NodeType::SendEmail, 500.0, -100.0),
            node("d", NodeType::SendEmail, 500.0, 100.0),
        ],
        vec![
            edge("ab", "a", "b", "none"),
            edge("bc", "b", "c", "true"),
            edge("bd", "b", "d", "on_false"),
        ],
    );

    assert!(store.delete_node("b"));

    let bridged = edge_between(&store, "a", "c");
    assert_eq!(bridged.source_handle, "none");
    // The abandoned branch dies, but its non-placeholder target survives.
    assert!(node_ids(&store).contains(&"d"));
    assert!(store.edges().iter().all(|e| e.target != "d"));
}

#[test]
fn test_delete_collects_orphaned_placeholder() {
    let mut store = synced_store(
        vec![
            node("a", NodeType::Webhook, 0.0, 0.0),
            node("b", NodeType::Conditional, 250.0, 0.0),
            node("c", NodeType::SendEmail, 500.0, -100.0),
            node("v", NodeType::VoidNode, 500.0, 100.0),
        ],
        vec![
            edge("ab", "a", "b", "none"),
            edge("bc", "b", "c", "true"),
            edge("bv", "b", "v", "on_false"),
        ],
    );

    assert!(store.delete_node("b"));

    assert_eq!(node_ids(&store), vec!["a", "c"]);
    let changes = store.get_changes_for_sync().unwrap();
    assert!(changes.deleted_nodes.contains(&"b".to_string()));
    assert!(changes.deleted_nodes.contains(&"v".to_string()));
}

#[test]
fn test_delete_unknown_node_is_noop() {
    let mut store = trigger_action_store();

    assert!(!store.delete_node("ghost"));

    assert_eq!(store.nodes().len(), 2);
    assert_eq!(store.edges().len(), 1);
    assert!(store.get_changes_for_sync().is_none());
}

#[test]
fn test_no_dangling_edges_after_renderer_removal() {
    let mut store = trigger_action_store();

    store.apply_node_changes(&[NodeChange::Remove {
        id: "a".to_string(),
    }]);

    // Every surviving edge references live nodes on both ends.
    for edge in store.edges() {
        assert!(store.find_node(&edge.source).is_some());
        assert!(store.find_node(&edge.target).is_some());
    }
    assert!(store.edges().is_empty());
}

#[test]
fn test_add_node_between_splits_edge() {
    let mut store = trigger_action_store();

    let new_id = store
        .add_node_between(Position::new(125.0, 0.0), "ab")
        .expect("split should succeed");

    assert_eq!(store.nodes().len(), 3);
    assert_eq!(store.edges().len(), 2);
    assert!(store.find_edge("ab").is_none());
    edge_between(&store, "a", &new_id);
    edge_between(&store, &new_id, "b");

    let changes = store.get_changes_for_sync().unwrap();
    assert_eq!(changes.deleted_edges, vec!["ab".to_string()]);
}

#[test]
fn test_add_node_after_replaces_existing_edge() {
    let mut store = trigger_action_store();

    let new_id = store
        .add_node_after("a", Position::new(250.0, 200.0), None)
        .expect("known source");

    // One edge per (source, handle): the old a->b edge is gone.
    assert!(store.find_edge("ab").is_none());
    assert_eq!(store.edges().len(), 1);
    let wired = edge_between(&store, "a", &new_id);
    assert_eq!(wired.source_handle, "none");
    assert_eq!(wired.target_handle, "input");
}

#[test]
fn test_connect_rejects_occupied_handle() {
    let mut store = synced_store(
        vec![
            node("a", NodeType::Webhook, 0.0, 0.0),
            node("b", NodeType::SendEmail, 250.0, 0.0),
            node("c", NodeType::SendEmail, 250.0, 200.0),
        ],
        vec![edge("ab", "a", "b", "none")],
    );

    let refused = store.connect(&Connection {
        source: "a".to_string(),
        target: "c".to_string(),
        source_handle: Some("none".to_string()),
        target_handle: None,
    });

    assert!(refused.is_none());
    assert_eq!(store.edges().len(), 1);

    // A free handle on another node connects fine.
    let accepted = store.connect(&Connection {
        source: "b".to_string(),
        target: "c".to_string(),
        source_handle: None,
        target_handle: None,
    });
    assert!(accepted.is_some());
    assert_eq!(store.edges().len(), 2);
}

#[test]
fn test_connect_missing_endpoint_is_noop() {
    let mut store = trigger_action_store();

    let refused = store.connect(&Connection {
        source: "a".to_string(),
        target: "ghost".to_string(),
        source_handle: Some("other".to_string()),
        target_handle: None,
    });

    assert!(refused.is_none());
    assert_eq!(store.edges().len(), 1);
}

#[test]
fn test_handle_uniqueness_across_mutations() {
    let mut store = conditional_store();

    // Try to double up on an occupied branch handle.
    let refused = store.connect(&Connection {
        source: "a".to_string(),
        target: "d".to_string(),
        source_handle: Some("on_true".to_string()),
        target_handle: None,
    });
    assert!(refused.is_none());

    let mut seen = std::collections::HashSet::new();
    for edge in store.edges() {
        assert!(
            seen.insert((edge.source.clone(), edge.source_handle.clone())),
            "duplicate occupancy on {}/{}",
            edge.source,
            edge.source_handle
        );
    }
}

#[test]
fn test_drag_marks_dirty_once_on_stop() {
    let mut store = trigger_action_store();

    store.on_node_drag_start("b");
    store.on_node_drag("b");
    store.apply_node_changes(&[NodeChange::Position {
        id: "b".to_string(),
        position: Position::new(300.0, 40.0),
    }]);
    // Intermediate frames do not taint sync state.
    assert!(store.get_changes_for_sync().is_none());

    store.on_node_drag("b");
    store.on_node_drag_stop("b");

    let changes = store.get_changes_for_sync().expect("drag stop taints");
    assert_eq!(changes.nodes.len(), 1);
    assert_eq!(changes.nodes[0].id, "b");
    assert_eq!(changes.nodes[0].position, Position::new(300.0, 40.0));
}

#[test]
fn test_drag_of_unsynced_node_opens_no_session() {
    let mut store = trigger_action_store();
    let new_id = store
        .add_node_after("b", Position::new(500.0, 0.0), None)
        .unwrap();

    store.on_node_drag(&new_id);
    store.on_node_drag_stop(&new_id);

    // The placeholder is reported because it is new, but nothing persisted
    // was tainted by dragging it.
    let changes = store.get_changes_for_sync().unwrap();
    assert!(changes.nodes.iter().all(|n| n.id == new_id));
}

#[test]
fn test_rename_taints_only_persisted_nodes() {
    let mut store = trigger_action_store();

    assert!(store.rename_node("b", "Send the mail"));
    let changes = store.get_changes_for_sync().unwrap();
    assert_eq!(changes.nodes.len(), 1);
    assert_eq!(changes.nodes[0].name, "Send the mail");

    assert!(!store.rename_node("ghost", "nope"));
}

#[test]
fn test_active_node_cleared_on_delete() {
    let mut store = trigger_action_store();
    store.set_active_node(Some("b".to_string()));
    assert_eq!(store.active_node().unwrap().id, "b");

    store.delete_node("b");
    assert!(store.active_node().is_none());
}
