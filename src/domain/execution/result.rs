use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::StepStatus;

/// Per-step outcome, appended to the executor's history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionResult {
    pub node_id: String,
    pub status: StepStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_node_id: Option<String>,
}

impl ExecutionResult {
    pub fn success(node_id: impl Into<String>, data: Option<Value>) -> Self {
        Self {
            node_id: node_id.into(),
            status: StepStatus::Success,
            data,
            error: None,
            next_node_id: None,
        }
    }

    pub fn waiting(node_id: impl Into<String>, data: Value) -> Self {
        Self {
            node_id: node_id.into(),
            status: StepStatus::Waiting,
            data: Some(data),
            error: None,
            next_node_id: None,
        }
    }

    pub fn error(node_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            node_id: node_id.into(),
            status: StepStatus::Error,
            data: None,
            error: Some(message.into()),
            next_node_id: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == StepStatus::Success
    }
}
