//! Tests for the pure topology helpers and the definition registry.
mod common;
use common::*;
use keiro::prelude::*;
use keiro::registry;
use keiro::topology;

#[test]
fn test_connected_handles_records_occupancy() {
    let edges = vec![
        edge("ab", "a", "b", "none"),
        edge("ac", "a", "c", "on_true"),
        edge("bc", "b", "c", "none"),
    ];

    let map = connected_handles(&edges, None);

    assert_eq!(map.len(), 2);
    assert!(map["a"].contains("none"));
    assert!(map["a"].contains("on_true"));
    assert!(map["b"].contains("none"));
    assert!(!map.contains_key("c"));
}

#[test]
fn test_connected_handles_drops_stale_ids() {
    let edges = vec![edge("ab", "a", "b", "none"), edge("xb", "x", "b", "none")];
    let nodes = vec![
        node("a", NodeType::Webhook, 0.0, 0.0),
        node("b", NodeType::SendEmail, 0.0, 0.0),
    ];

    let map = connected_handles(&edges, Some(&nodes));

    assert!(map.contains_key("a"));
    assert!(!map.contains_key("x"));
}

#[test]
fn test_edge_label_rules() {
    assert_eq!(edge_label("none"), None);
    assert_eq!(edge_label("next"), None);
    assert_eq!(edge_label("done"), None);
    assert_eq!(edge_label("success"), None);
    assert_eq!(edge_label("on_true").as_deref(), Some("true"));
    assert_eq!(edge_label("on_false").as_deref(), Some("false"));
    assert_eq!(edge_label("case_3").as_deref(), Some("Case 3"));
    assert_eq!(edge_label("fallback").as_deref(), Some("fallback"));
}

#[test]
fn test_edge_label_for_node_consults_definition() {
    let conditional = node("a", NodeType::Conditional, 0.0, 0.0);
    assert_eq!(
        topology::edge_label_for_node(&conditional, "on_true").as_deref(),
        Some("True")
    );

    let switch = node("s", NodeType::Switch, 0.0, 0.0);
    assert_eq!(
        topology::edge_label_for_node(&switch, "case_2").as_deref(),
        Some("Case 2")
    );

    let action = node("b", NodeType::SendEmail, 0.0, 0.0);
    assert_eq!(topology::edge_label_for_node(&action, "none"), None);
}

#[test]
fn test_make_edge_fills_defaults() {
    let nodes = vec![node("a", NodeType::SendEmail, 0.0, 0.0)];

    let edge = make_edge(&nodes, Some("v1"), EdgeSpec::between("a", "b"));

    assert!(!edge.id.is_empty());
    assert_eq!(edge.source_handle, "none");
    assert_eq!(edge.target_handle, "input");
    assert_eq!(edge.version_id.as_deref(), Some("v1"));
    assert_eq!(edge.label, None);
    assert_eq!(edge.sync, SyncState::New);
}

#[test]
fn test_make_edge_derives_switch_expression() {
    let mut switch = node("s", NodeType::Switch, 0.0, 0.0);
    switch.config = NodeConfig::switch(vec![
        SwitchCase::new("case_1", "amount > 100"),
        SwitchCase::new("case_2", "amount > 500"),
    ]);
    let nodes = vec![switch];

    let edge = make_edge(
        &nodes,
        None,
        EdgeSpec::between("s", "t").with_source_handle("case_2"),
    );

    assert_eq!(edge.expression.as_deref(), Some("amount > 500"));
    assert_eq!(edge.label.as_deref(), Some("Case 2"));
}

#[test]
fn test_make_edge_minted_ids_are_unique() {
    let nodes: Vec<WorkflowNode> = Vec::new();
    let first = make_edge(&nodes, None, EdgeSpec::between("a", "b"));
    let second = make_edge(&nodes, None, EdgeSpec::between("a", "b"));
    assert_ne!(first.id, second.id);
}

#[test]
fn test_registry_definitions() {
    let loop_def = definition_for(NodeType::Loop);
    assert_eq!(loop_def.outputs, &["body", "end"][..]);
    assert_eq!(loop_def.self_loop_handle, Some("body"));

    let conditional_def = definition_for(NodeType::Conditional);
    assert_eq!(conditional_def.outputs, &["on_true", "on_false"][..]);
    assert_eq!(conditional_def.label_for("true"), Some("True"));

    // Types without a dedicated entry fall back to the single-output shape.
    let wait_def = definition_for(NodeType::Wait);
    assert_eq!(wait_def.outputs, &["none"][..]);
    assert_eq!(wait_def.default_target, "input");

    assert_eq!(registry::target_handle_for(NodeType::Merge), "input-1");
}

#[test]
fn test_switch_outputs_follow_configuration() {
    let mut switch = node("s", NodeType::Switch, 0.0, 0.0);
    assert_eq!(outputs_for(&switch), vec!["case_1"]);

    switch.config = NodeConfig::switch(vec![
        SwitchCase::new("case_1", ""),
        SwitchCase::new("", ""),
        SwitchCase::new("case_3", ""),
    ]);
    // Unnamed cases take their positional handle.
    assert_eq!(outputs_for(&switch), vec!["case_1", "case_2", "case_3"]);
}

#[test]
fn test_trigger_type_set() {
    for trigger in [
        NodeType::Webhook,
        NodeType::Event,
        NodeType::Schedule,
        NodeType::HttpRequest,
        NodeType::Cron,
        NodeType::Trigger,
    ] {
        assert!(trigger.is_trigger(), "{trigger} should be a trigger");
    }
    assert!(!NodeType::SendEmail.is_trigger());
    assert!(!NodeType::Loop.is_trigger());
    assert!(!NodeType::VoidNode.is_trigger());
}
