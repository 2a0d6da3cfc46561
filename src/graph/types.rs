use petgraph::stable_graph::NodeIndex;

use crate::dsl::schema::NodeType;

/// Graph node: one action of the flow.
#[derive(Debug, Clone)]
pub struct GraphNode {
    pub id: String,
    pub node_type: NodeType,
}

/// Graph edge.
#[derive(Debug, Clone)]
pub struct GraphEdge {
    pub edge_type: EdgeType,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EdgeType {
    /// Ordinary `nextActions` entry.
    Next { conditional: bool },
    /// Decision option, keyed by the choice value.
    DecisionOption { value: String },
}

/// Action id to petgraph NodeIndex.
pub type NodeIndexMap = std::collections::HashMap<String, NodeIndex>;
