use crate::dsl::schema::{Flow, NodeKind};
use crate::error::GraphValidationError;

use super::types::Diagnostic;

/// Per-kind shape checks.
pub fn validate(flow: &Flow) -> (Vec<GraphValidationError>, Vec<Diagnostic>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    for node in &flow.nodes {
        match &node.kind {
            NodeKind::Decision(decision) => {
                if decision.options.is_empty() {
                    errors.push(GraphValidationError::EmptyDecision(node.id.clone()));
                }
            }
            NodeKind::Completion(_) => {
                if !node.next_actions.is_empty() {
                    errors.push(GraphValidationError::CompletionHasNextActions(
                        node.id.clone(),
                    ));
                }
            }
            NodeKind::Blockchain(_) | NodeKind::Transfer(_) | NodeKind::Http(_) => {
                if node.next_actions.is_empty() {
                    warnings.push(Diagnostic::warning(
                        "W102",
                        format!(
                            "Action '{}' has no next actions; the flow ends there without completion",
                            node.id
                        ),
                        Some(node.id.clone()),
                    ));
                } else if node.next_actions.iter().all(|e| !e.is_unconditional()) {
                    warnings.push(Diagnostic::warning(
                        "W103",
                        format!(
                            "Action '{}' has only conditional next actions and no fallback",
                            node.id
                        ),
                        Some(node.id.clone()),
                    ));
                }
            }
        }
    }

    (errors, warnings)
}
