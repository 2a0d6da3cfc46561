//! Flow-level error types.

use thiserror::Error;

use super::GraphValidationError;
use crate::dsl::validation::ValidationReport;

/// Flow-level errors
#[derive(Debug, Error)]
pub enum FlowError {
    #[error("Flow parse error: {0}")]
    ParseError(String),
    #[error("Graph validation error: {0}")]
    GraphValidation(#[from] GraphValidationError),
    #[error("Validation failed")]
    ValidationFailed(Box<ValidationReport>),
}
