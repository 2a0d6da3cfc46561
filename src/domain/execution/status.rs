//! Step and executor states.

use serde::{Deserialize, Serialize};

/// Outcome status of a single `step()` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    Success,
    Error,
    /// The action needs caller input (a decision choice) before it can run.
    Waiting,
    Skipped,
}

/// Position of an executor within its flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "nodeId", rename_all = "camelCase")]
pub enum ExecutorState {
    Running(String),
    WaitingForInput(String),
    /// A completion action ran.
    Completed,
    /// No outgoing edge matched: the run ended without a completion action.
    Halted,
}

impl ExecutorState {
    pub fn current_node_id(&self) -> Option<&str> {
        match self {
            ExecutorState::Running(id) | ExecutorState::WaitingForInput(id) => Some(id),
            ExecutorState::Completed | ExecutorState::Halted => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, ExecutorState::Completed | ExecutorState::Halted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_serde() {
        assert_eq!(serde_json::to_value(StepStatus::Waiting).unwrap(), json!("waiting"));
    }

    #[test]
    fn test_state_serde_roundtrip_shape() {
        let v = serde_json::to_value(ExecutorState::WaitingForInput("pick".into())).unwrap();
        assert_eq!(v, json!({"state": "waitingForInput", "nodeId": "pick"}));
        let v = serde_json::to_value(ExecutorState::Halted).unwrap();
        assert_eq!(v, json!({"state": "halted"}));
    }

    #[test]
    fn test_current_node_id() {
        assert_eq!(ExecutorState::Running("a".into()).current_node_id(), Some("a"));
        assert_eq!(ExecutorState::Completed.current_node_id(), None);
        assert!(ExecutorState::Halted.is_terminal());
    }
}
