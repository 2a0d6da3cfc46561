use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

// ================================
// Flow Document
// ================================

/// A nested action flow: a directed graph of actions entered at
/// `initial_node_id`.
///
/// Flows are plain JSON documents and are never mutated once handed to the
/// validator or an executor.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Flow {
    #[serde(default)]
    pub label: String,
    #[serde(rename = "initialActionId", alias = "initialNodeId", default)]
    pub initial_node_id: String,
    #[serde(rename = "actions", alias = "nodes", default)]
    pub nodes: Vec<Node>,
}

impl Flow {
    /// Linear lookup by id; executors keep their own index.
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }
}

/// One step of a flow. The `type` tag selects the [`NodeKind`] payload.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(
        rename = "nextActions",
        alias = "outgoingEdges",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub next_actions: Vec<Edge>,
    #[serde(flatten)]
    pub kind: NodeKind,
}

impl Node {
    pub fn node_type(&self) -> NodeType {
        self.kind.node_type()
    }

    pub fn is_completion(&self) -> bool {
        matches!(self.kind, NodeKind::Completion(_))
    }

    /// Every action id this node can transition to: edge targets in
    /// declaration order, then decision option targets.
    pub fn successor_ids(&self) -> impl Iterator<Item = &str> {
        let options: &[DecisionOption] = match &self.kind {
            NodeKind::Decision(d) => &d.options,
            _ => &[],
        };
        self.next_actions
            .iter()
            .map(|e| e.target_node_id.as_str())
            .chain(options.iter().map(|o| o.target_node_id.as_str()))
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NodeKind {
    Blockchain(BlockchainAction),
    Transfer(TransferAction),
    Http(HttpAction),
    Decision(DecisionAction),
    Completion(CompletionAction),
}

impl NodeKind {
    pub fn node_type(&self) -> NodeType {
        match self {
            NodeKind::Blockchain(_) => NodeType::Blockchain,
            NodeKind::Transfer(_) => NodeType::Transfer,
            NodeKind::Http(_) => NodeType::Http,
            NodeKind::Decision(_) => NodeType::Decision,
            NodeKind::Completion(_) => NodeType::Completion,
        }
    }
}

// ================================
// Node Type Enum
// ================================

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    Blockchain,
    Transfer,
    Http,
    Decision,
    Completion,
}

impl std::fmt::Display for NodeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            NodeType::Blockchain => "blockchain",
            NodeType::Transfer => "transfer",
            NodeType::Http => "http",
            NodeType::Decision => "decision",
            NodeType::Completion => "completion",
        };
        f.write_str(s)
    }
}

// ================================
// Edges & Conditions
// ================================

/// A transition to another action, taken when every condition holds.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    #[serde(rename = "actionId", alias = "targetNodeId")]
    pub target_node_id: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<Condition>,
}

impl Edge {
    pub fn to(target: impl Into<String>) -> Self {
        Self {
            target_node_id: target.into(),
            conditions: Vec::new(),
        }
    }

    pub fn when(target: impl Into<String>, conditions: Vec<Condition>) -> Self {
        Self {
            target_node_id: target.into(),
            conditions,
        }
    }

    pub fn is_unconditional(&self) -> bool {
        self.conditions.is_empty()
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Condition {
    /// Dotted path into the execution context, e.g. `lastResult.data.v`.
    pub field: String,
    pub operator: ComparisonOperator,
    #[serde(default)]
    pub value: Value,
}

impl Condition {
    pub fn new(field: impl Into<String>, operator: ComparisonOperator, value: Value) -> Self {
        Self {
            field: field.into(),
            operator,
            value,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ComparisonOperator {
    #[serde(alias = "==")]
    Eq,
    #[serde(alias = "!=")]
    Ne,
    #[serde(alias = ">")]
    Gt,
    #[serde(alias = "<")]
    Lt,
    #[serde(alias = ">=")]
    Gte,
    #[serde(alias = "<=")]
    Lte,
    Contains,
}

// ================================
// Chain Context
// ================================

/// Opaque chain names; resolution to chain ids belongs to the chain client.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ChainContext {
    #[serde(default)]
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
}

// ================================
// Blockchain Action
// ================================

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BlockchainAction {
    pub address: String,
    pub function_name: String,
    /// Already-resolved call arguments, in ABI order.
    #[serde(default)]
    pub params: Vec<Value>,
    /// Native value attached to payable calls.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Value>,
    #[serde(default)]
    pub chains: ChainContext,
}

// ================================
// Transfer Action
// ================================

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransferAction {
    pub to: String,
    pub amount: Value,
    #[serde(default)]
    pub chains: ChainContext,
}

// ================================
// HTTP Action
// ================================

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HttpAction {
    #[serde(alias = "url")]
    pub endpoint: String,
    #[serde(default)]
    pub method: HttpMethod,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub headers: HashMap<String, String>,
    #[serde(default, alias = "params", skip_serializing_if = "Value::is_null")]
    pub body: Value,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    #[default]
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

// ================================
// Decision Action
// ================================

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DecisionAction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub options: Vec<DecisionOption>,
}

/// A branch chosen by the caller through `userChoice` rather than by
/// context conditions.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DecisionOption {
    pub label: String,
    pub value: String,
    #[serde(rename = "nextActionId", alias = "targetNodeId")]
    pub target_node_id: String,
}

// ================================
// Completion Action
// ================================

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CompletionAction {
    pub message: String,
    #[serde(default)]
    pub status: CompletionStatus,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CompletionStatus {
    #[default]
    Success,
    Error,
    Info,
}
