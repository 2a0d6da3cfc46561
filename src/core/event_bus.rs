use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::mpsc;

use crate::domain::execution::ExecutionResult;

/// Flow events, emitted by the executor as it steps.
#[derive(Clone, Debug, Serialize)]
pub enum FlowEvent {
    /// An action is about to be dispatched
    StepStarted {
        node_id: String,
        timestamp: DateTime<Utc>,
    },

    /// A step produced a result (any status)
    StepFinished {
        result: ExecutionResult,
        timestamp: DateTime<Utc>,
    },

    /// A decision is waiting for the caller's choice
    WaitingForInput {
        node_id: String,
        timestamp: DateTime<Utc>,
    },

    /// A completion action ran
    FlowCompleted {
        node_id: String,
        timestamp: DateTime<Utc>,
    },

    /// No outgoing edge matched; the run ended without completion
    FlowHalted {
        node_id: String,
        timestamp: DateTime<Utc>,
    },
}

/// Event sender
pub type EventSender = mpsc::UnboundedSender<FlowEvent>;

/// Event receiver
pub type EventReceiver = mpsc::UnboundedReceiver<FlowEvent>;

/// Create an event channel
pub fn create_event_channel() -> (EventSender, EventReceiver) {
    mpsc::unbounded_channel()
}
