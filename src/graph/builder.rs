use std::collections::{HashMap, HashSet};

use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use petgraph::visit::Bfs;

use crate::dsl::schema::{Flow, NodeKind};

use super::types::*;

/// Directed-graph projection of a [`Flow`], used for topology checks.
#[derive(Debug)]
pub struct FlowGraph {
    pub graph: StableDiGraph<GraphNode, GraphEdge>,
    pub node_index_map: NodeIndexMap,
}

impl FlowGraph {
    /// Ids of every action reachable from `start` (inclusive).
    pub fn reachable_from(&self, start: &str) -> HashSet<String> {
        let mut reachable = HashSet::new();
        let Some(&start_idx) = self.node_index_map.get(start) else {
            return reachable;
        };
        let mut bfs = Bfs::new(&self.graph, start_idx);
        while let Some(idx) = bfs.next(&self.graph) {
            if let Some(node) = self.graph.node_weight(idx) {
                reachable.insert(node.id.clone());
            }
        }
        reachable
    }

    pub fn has_cycle(&self) -> bool {
        petgraph::algo::is_cyclic_directed(&self.graph)
    }

    /// Successor ids of an action, in insertion order.
    pub fn successors(&self, node_id: &str) -> Vec<String> {
        let Some(&idx) = self.node_index_map.get(node_id) else {
            return Vec::new();
        };
        let mut out: Vec<String> = self
            .graph
            .neighbors_directed(idx, petgraph::Direction::Outgoing)
            .filter_map(|n| self.graph.node_weight(n).map(|node| node.id.clone()))
            .collect();
        // petgraph walks outgoing edges newest-first
        out.reverse();
        out
    }
}

/// Build the graph. The first action with a given id wins; edges to
/// unknown ids are skipped (the structure layer reports them).
pub fn build_flow_graph(flow: &Flow) -> FlowGraph {
    let mut graph = StableDiGraph::<GraphNode, GraphEdge>::new();
    let mut node_index_map: HashMap<String, NodeIndex> = HashMap::new();

    for node in &flow.nodes {
        if node_index_map.contains_key(&node.id) {
            continue;
        }
        let idx = graph.add_node(GraphNode {
            id: node.id.clone(),
            node_type: node.node_type(),
        });
        node_index_map.insert(node.id.clone(), idx);
    }

    let mut seen = HashSet::new();
    for node in &flow.nodes {
        if !seen.insert(node.id.as_str()) {
            continue;
        }
        let Some(&source) = node_index_map.get(&node.id) else {
            continue;
        };
        for edge in &node.next_actions {
            if let Some(&target) = node_index_map.get(&edge.target_node_id) {
                graph.add_edge(
                    source,
                    target,
                    GraphEdge {
                        edge_type: EdgeType::Next {
                            conditional: !edge.is_unconditional(),
                        },
                    },
                );
            }
        }
        if let NodeKind::Decision(decision) = &node.kind {
            for option in &decision.options {
                if let Some(&target) = node_index_map.get(&option.target_node_id) {
                    graph.add_edge(
                        source,
                        target,
                        GraphEdge {
                            edge_type: EdgeType::DecisionOption {
                                value: option.value.clone(),
                            },
                        },
                    );
                }
            }
        }
    }

    FlowGraph {
        graph,
        node_index_map,
    }
}
