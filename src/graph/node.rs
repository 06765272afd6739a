use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a node. Opaque to the engine; minted as UUIDv4 text.
pub type NodeId = String;

/// The closed set of node types a workflow graph can contain.
///
/// `Void` is the placeholder type used for not-yet-configured successors;
/// `Cron` and `Trigger` are legacy aliases kept for workflows persisted by
/// older backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeType {
    Webhook,
    Event,
    Schedule,
    HttpRequest,
    Cron,
    Trigger,

    SendEmail,
    SendHttpRequest,
    UpdateDatabase,
    MembershipInvite,

    Map,
    Rename,
    Remove,
    Copy,
    Filter,
    Aggregate,
    Group,
    Concat,
    Formula,
    ConvertType,
    Merge,
    Split,

    DateFormat,
    DateOperation,
    Timestamp,

    Conditional,
    Switch,
    Loop,
    RuleExecutor,

    CodeBlock,
    Wait,

    #[serde(rename = "void_node")]
    VoidNode,
}

impl NodeType {
    /// Entry-point types. Trigger nodes start a workflow and may never have
    /// incoming edges.
    pub fn is_trigger(self) -> bool {
        matches!(
            self,
            NodeType::Webhook
                | NodeType::Event
                | NodeType::Schedule
                | NodeType::HttpRequest
                | NodeType::Cron
                | NodeType::Trigger
        )
    }

    /// Types whose retype synthesizes one placeholder child per output handle.
    pub fn is_branching(self) -> bool {
        matches!(
            self,
            NodeType::Conditional | NodeType::Switch | NodeType::RuleExecutor
        )
    }

    /// The wire name of this type, e.g. `"rule_executor"`.
    pub fn as_str(self) -> &'static str {
        match self {
            NodeType::Webhook => "webhook",
            NodeType::Event => "event",
            NodeType::Schedule => "schedule",
            NodeType::HttpRequest => "http_request",
            NodeType::Cron => "cron",
            NodeType::Trigger => "trigger",
            NodeType::SendEmail => "send_email",
            NodeType::SendHttpRequest => "send_http_request",
            NodeType::UpdateDatabase => "update_database",
            NodeType::MembershipInvite => "membership_invite",
            NodeType::Map => "map",
            NodeType::Rename => "rename",
            NodeType::Remove => "remove",
            NodeType::Copy => "copy",
            NodeType::Filter => "filter",
            NodeType::Aggregate => "aggregate",
            NodeType::Group => "group",
            NodeType::Concat => "concat",
            NodeType::Formula => "formula",
            NodeType::ConvertType => "convert_type",
            NodeType::Merge => "merge",
            NodeType::Split => "split",
            NodeType::DateFormat => "date_format",
            NodeType::DateOperation => "date_operation",
            NodeType::Timestamp => "timestamp",
            NodeType::Conditional => "conditional",
            NodeType::Switch => "switch",
            NodeType::Loop => "loop",
            NodeType::RuleExecutor => "rule_executor",
            NodeType::CodeBlock => "code_block",
            NodeType::Wait => "wait",
            NodeType::VoidNode => "void_node",
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Free-form canvas coordinate, mutated by drag.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Sync state of a live node or edge record relative to the last persisted
/// snapshot. A deleted previously-persisted entity has no record to carry a
/// tag, so deletions live in the store's explicit deleted-id sets instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncState {
    /// Present locally, unknown to the backend.
    #[default]
    New,
    /// Persisted and unchanged since the last sync.
    Synced,
    /// Persisted but locally modified.
    Dirty,
}

impl SyncState {
    /// Whether the backend knows this entity under its current id.
    pub fn is_persisted(self) -> bool {
        !matches!(self, SyncState::New)
    }

    /// Transition to `Dirty`, but only for persisted entities. A `New` entity
    /// is already reported in full, so there is nothing to re-mark.
    pub fn taint(&mut self) {
        if matches!(self, SyncState::Synced) {
            *self = SyncState::Dirty;
        }
    }
}

/// One case of a `switch` node's configuration. `condition` doubles as the
/// output handle name (`case_1`, `case_2`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SwitchCase {
    pub condition: String,
    #[serde(default)]
    pub expression: String,
}

impl SwitchCase {
    pub fn new(condition: impl Into<String>, expression: impl Into<String>) -> Self {
        Self {
            condition: condition.into(),
            expression: expression.into(),
        }
    }
}

/// Iteration strategy of a `loop` node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "loopType", rename_all = "snake_case")]
pub enum LoopMode {
    ForEach {
        #[serde(rename = "dataSourcePath")]
        data_source_path: String,
    },
    FixedCount {
        #[serde(rename = "maxIterations")]
        max_iterations: u64,
    },
    WhileLoop {
        #[serde(rename = "exitCondition")]
        exit_condition: String,
    },
}

/// HTTP authentication modes for webhook-style nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthKind {
    #[default]
    None,
    Basic,
    Header,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Authentication {
    #[serde(rename = "type")]
    pub kind: AuthKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookConfig {
    pub method: String,
    pub authentication: Authentication,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            method: "POST".to_string(),
            authentication: Authentication::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MembershipInviteConfig {
    pub app_name: String,
    pub role_ids: Vec<i64>,
}

impl Default for MembershipInviteConfig {
    fn default() -> Self {
        Self {
            app_name: "KYC".to_string(),
            role_ids: vec![17],
        }
    }
}

/// Per-type node configuration, keyed by the node's `NodeType`.
///
/// The engine only interprets the variants it needs for topology decisions
/// (switch cases drive output handles, loop/webhook/invite shapes drive the
/// persistence defaulting rules); everything else rides along as raw JSON
/// validated by the host application's form layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeConfig {
    Switch {
        #[serde(rename = "switchCases")]
        switch_cases: Vec<SwitchCase>,
    },
    Loop(LoopMode),
    Webhook(WebhookConfig),
    MembershipInvite(MembershipInviteConfig),
    Other(serde_json::Value),
}

impl Default for NodeConfig {
    fn default() -> Self {
        NodeConfig::Other(serde_json::Value::Object(serde_json::Map::new()))
    }
}

impl NodeConfig {
    pub fn switch(cases: Vec<SwitchCase>) -> Self {
        NodeConfig::Switch {
            switch_cases: cases,
        }
    }

    /// The switch cases, when this configuration carries any.
    pub fn switch_cases(&self) -> Option<&[SwitchCase]> {
        match self {
            NodeConfig::Switch { switch_cases } => Some(switch_cases),
            _ => None,
        }
    }
}

/// A vertex of the workflow graph.
///
/// `outputs` is derived from `node_type` (and, for switches, from the case
/// configuration) and recomputed on every type or configuration change; it is
/// never set independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowNode {
    pub id: NodeId,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub version_id: Option<String>,
    #[serde(default)]
    pub template_id: Option<String>,
    #[serde(default)]
    pub config: NodeConfig,
    /// Output handle names, in declaration order.
    #[serde(default)]
    pub outputs: Vec<String>,
    /// Id of the enclosing loop controller, if this node lives in a loop body.
    /// A weak membership reference only; never used for ownership cleanup.
    #[serde(default)]
    pub parent_loop: Option<NodeId>,
    pub position: Position,
    /// Renderer selection state; not part of the persisted shape.
    #[serde(skip)]
    pub selected: bool,
    #[serde(skip)]
    pub sync: SyncState,
}

impl WorkflowNode {
    /// Creates a node of the given type with derived outputs left empty;
    /// callers recompute outputs through the registry.
    pub fn new(id: impl Into<NodeId>, node_type: NodeType, position: Position) -> Self {
        Self {
            id: id.into(),
            node_type,
            name: String::new(),
            description: String::new(),
            version_id: None,
            template_id: None,
            config: NodeConfig::default(),
            outputs: Vec::new(),
            parent_loop: None,
            position,
            selected: false,
            sync: SyncState::New,
        }
    }
}
