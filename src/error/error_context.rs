use serde::{Deserialize, Serialize};

/// Error retryability marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorRetryability {
    Retryable,
    NonRetryable,
    Unknown,
}

/// Error classification code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    // Flow state
    NoCurrentAction,
    ActionNotFound,
    MaxStepsExceeded,

    // Input
    InvalidChoice,
    VariableNotFound,
    SerializationError,

    // Capabilities
    CapabilityUnavailable,
    ChainError,
    HttpClientError,
    HttpServerError,
    NetworkError,
}

impl ErrorCode {
    /// Default retryability for errors carrying this code.
    pub fn retryability(self) -> ErrorRetryability {
        match self {
            ErrorCode::ChainError | ErrorCode::HttpServerError | ErrorCode::NetworkError => {
                ErrorRetryability::Retryable
            }
            ErrorCode::HttpClientError => ErrorRetryability::Unknown,
            _ => ErrorRetryability::NonRetryable,
        }
    }
}
