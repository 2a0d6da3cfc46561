use crate::dsl::schema::Flow;
use crate::error::GraphValidationError;
use crate::graph::build_flow_graph;

use super::types::Diagnostic;

/// Reachability from the initial action, plus a cycle warning.
pub fn validate(flow: &Flow) -> (Vec<GraphValidationError>, Vec<Diagnostic>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    let graph = build_flow_graph(flow);
    let reachable = graph.reachable_from(&flow.initial_node_id);

    let mut unreachable: Vec<String> = Vec::new();
    for node in &flow.nodes {
        if !reachable.contains(&node.id) && !unreachable.contains(&node.id) {
            unreachable.push(node.id.clone());
        }
    }
    if !unreachable.is_empty() {
        errors.push(GraphValidationError::UnreachableActions(unreachable));
    }

    if graph.has_cycle() {
        warnings.push(Diagnostic::warning(
            "W101",
            "Flow contains a cycle; a run may never reach a completion action".to_string(),
            None,
        ));
    }

    (errors, warnings)
}
