//! Structural validation errors for flow definitions.

use thiserror::Error;

/// A structural problem in a flow definition.
///
/// Every variant names the offending action (or field) and carries a
/// message substring unique to its rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphValidationError {
    #[error("Flow must contain at least one action")]
    EmptyFlow,
    #[error("initialActionId is required")]
    MissingInitialAction,
    #[error("initialActionId '{0}' does not match any action")]
    UnknownInitialAction(String),
    #[error("Duplicate action id: {0}")]
    DuplicateActionId(String),
    #[error("Action '{node_id}' references unknown next action '{target}'")]
    UnknownEdgeTarget { node_id: String, target: String },
    #[error("Decision '{node_id}' option '{value}' references unknown action '{target}'")]
    UnknownOptionTarget {
        node_id: String,
        value: String,
        target: String,
    },
    #[error("Unreachable actions from initial action: {}", .0.join(", "))]
    UnreachableActions(Vec<String>),
    #[error("Decision action '{0}' must have at least one option")]
    EmptyDecision(String),
    #[error("Completion action '{0}' must not have next actions")]
    CompletionHasNextActions(String),
}

impl GraphValidationError {
    /// Stable diagnostic code for this rule.
    pub fn code(&self) -> &'static str {
        match self {
            GraphValidationError::EmptyFlow => "E001",
            GraphValidationError::MissingInitialAction => "E002",
            GraphValidationError::UnknownInitialAction(_) => "E003",
            GraphValidationError::DuplicateActionId(_) => "E004",
            GraphValidationError::UnknownEdgeTarget { .. } => "E005",
            GraphValidationError::UnknownOptionTarget { .. } => "E006",
            GraphValidationError::UnreachableActions(_) => "E101",
            GraphValidationError::EmptyDecision(_) => "E201",
            GraphValidationError::CompletionHasNextActions(_) => "E202",
        }
    }

    /// The action the error is about, when there is a single one.
    pub fn node_id(&self) -> Option<&str> {
        match self {
            GraphValidationError::UnknownInitialAction(id)
            | GraphValidationError::DuplicateActionId(id)
            | GraphValidationError::EmptyDecision(id)
            | GraphValidationError::CompletionHasNextActions(id) => Some(id),
            GraphValidationError::UnknownEdgeTarget { node_id, .. }
            | GraphValidationError::UnknownOptionTarget { node_id, .. } => Some(node_id),
            GraphValidationError::UnreachableActions(ids) => ids.first().map(String::as_str),
            GraphValidationError::EmptyFlow | GraphValidationError::MissingInitialAction => None,
        }
    }

    /// Errors after which topology and per-kind checks are meaningless.
    pub fn is_fatal_structure(&self) -> bool {
        matches!(
            self,
            GraphValidationError::EmptyFlow
                | GraphValidationError::MissingInitialAction
                | GraphValidationError::UnknownInitialAction(_)
                | GraphValidationError::DuplicateActionId(_)
        )
    }
}
