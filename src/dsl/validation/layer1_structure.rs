use std::collections::HashSet;

use crate::dsl::schema::{Flow, NodeKind};
use crate::error::GraphValidationError;

/// Identity and reference checks: non-empty flow, initial action, unique
/// ids, and that every edge/option target exists.
pub fn validate(flow: &Flow) -> Vec<GraphValidationError> {
    let mut errors = Vec::new();

    if flow.nodes.is_empty() {
        errors.push(GraphValidationError::EmptyFlow);
        return errors;
    }

    if flow.initial_node_id.trim().is_empty() {
        errors.push(GraphValidationError::MissingInitialAction);
    } else if !flow.nodes.iter().any(|n| n.id == flow.initial_node_id) {
        errors.push(GraphValidationError::UnknownInitialAction(
            flow.initial_node_id.clone(),
        ));
    }

    let mut ids = HashSet::with_capacity(flow.nodes.len());
    let mut reported = HashSet::new();
    for node in &flow.nodes {
        if !ids.insert(node.id.as_str()) && reported.insert(node.id.as_str()) {
            errors.push(GraphValidationError::DuplicateActionId(node.id.clone()));
        }
    }

    for node in &flow.nodes {
        for edge in &node.next_actions {
            if !ids.contains(edge.target_node_id.as_str()) {
                errors.push(GraphValidationError::UnknownEdgeTarget {
                    node_id: node.id.clone(),
                    target: edge.target_node_id.clone(),
                });
            }
        }
        if let NodeKind::Decision(decision) = &node.kind {
            for option in &decision.options {
                if !ids.contains(option.target_node_id.as_str()) {
                    errors.push(GraphValidationError::UnknownOptionTarget {
                        node_id: node.id.clone(),
                        value: option.value.clone(),
                        target: option.target_node_id.clone(),
                    });
                }
            }
        }
    }

    errors
}
