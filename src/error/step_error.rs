use thiserror::Error;

use super::{ErrorCode, ErrorRetryability};

/// Step-level errors: an action's dispatch failed.
///
/// These never escape [`FlowExecutor::step`](crate::core::FlowExecutor::step);
/// they are folded into an `error`-status result.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StepError {
    #[error("no current action or flow already completed")]
    NoCurrentAction,
    #[error("Action not found: {0}")]
    ActionNotFound(String),
    #[error("Max steps exceeded: {0}")]
    MaxStepsExceeded(u32),
    #[error("Invalid choice: {0}")]
    InvalidChoice(String),
    #[error("Variable not found: {0}")]
    VariableNotFound(String),
    #[error("Serialization error: {0}")]
    SerializationError(String),
    #[error("Capability not configured: {0}")]
    CapabilityUnavailable(&'static str),
    #[error("Blockchain error: {0}")]
    ChainError(String),
    #[error("HTTP error: {status}: {message}")]
    HttpStatus { status: u16, message: String },
    #[error("Network error: {0}")]
    NetworkError(String),
}

impl StepError {
    pub fn error_code(&self) -> ErrorCode {
        match self {
            StepError::NoCurrentAction => ErrorCode::NoCurrentAction,
            StepError::ActionNotFound(_) => ErrorCode::ActionNotFound,
            StepError::MaxStepsExceeded(_) => ErrorCode::MaxStepsExceeded,
            StepError::InvalidChoice(_) => ErrorCode::InvalidChoice,
            StepError::VariableNotFound(_) => ErrorCode::VariableNotFound,
            StepError::SerializationError(_) => ErrorCode::SerializationError,
            StepError::CapabilityUnavailable(_) => ErrorCode::CapabilityUnavailable,
            StepError::ChainError(_) => ErrorCode::ChainError,
            StepError::HttpStatus { status, .. } if *status >= 500 => ErrorCode::HttpServerError,
            StepError::HttpStatus { .. } => ErrorCode::HttpClientError,
            StepError::NetworkError(_) => ErrorCode::NetworkError,
        }
    }

    pub fn retryability(&self) -> ErrorRetryability {
        self.error_code().retryability()
    }
}

impl From<serde_json::Error> for StepError {
    fn from(e: serde_json::Error) -> Self {
        StepError::SerializationError(e.to_string())
    }
}
