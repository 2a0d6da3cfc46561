//! Per-kind step handlers.
//!
//! [`dispatch`] matches exhaustively on [`NodeKind`]; each handler renders its
//! templated fields against the execution context, awaits the relevant
//! capability and reports a [`StepOutcome`]. Context bookkeeping and edge
//! selection stay with the executor.

pub mod blockchain;
pub mod completion;
pub mod decision;
pub mod http;
pub mod transfer;

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::core::capabilities::{ChainClient, HttpTransport};
use crate::core::execution_context::ExecutionContext;
use crate::core::runtime_context::RuntimeContext;
use crate::domain::execution::StepStatus;
use crate::dsl::schema::{Node, NodeKind};
use crate::error::StepError;

/// What a handler produced. `next_node_id` is only pre-set by decisions.
#[derive(Debug, Clone, PartialEq)]
pub struct StepOutcome {
    pub status: StepStatus,
    pub data: Option<Value>,
    pub next_node_id: Option<String>,
}

impl StepOutcome {
    pub fn success(data: Value) -> Self {
        Self {
            status: StepStatus::Success,
            data: Some(data),
            next_node_id: None,
        }
    }

    pub fn waiting(data: Value) -> Self {
        Self {
            status: StepStatus::Waiting,
            data: Some(data),
            next_node_id: None,
        }
    }

    pub fn with_next(mut self, node_id: impl Into<String>) -> Self {
        self.next_node_id = Some(node_id.into());
        self
    }
}

/// External collaborators available to the handlers.
#[derive(Clone, Default)]
pub struct Capabilities {
    pub chain: Option<Arc<dyn ChainClient>>,
    pub http: Option<Arc<dyn HttpTransport>>,
}

impl std::fmt::Debug for Capabilities {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Capabilities")
            .field("chain", &self.chain.is_some())
            .field("http", &self.http.is_some())
            .finish()
    }
}

impl Capabilities {
    pub(crate) fn chain(&self) -> Result<&dyn ChainClient, StepError> {
        self.chain
            .as_deref()
            .ok_or(StepError::CapabilityUnavailable("chain client"))
    }

    pub(crate) fn http(&self) -> Result<&dyn HttpTransport, StepError> {
        self.http
            .as_deref()
            .ok_or(StepError::CapabilityUnavailable("http transport"))
    }
}

/// Shared, read-only inputs of one dispatch.
#[derive(Debug, Clone, Copy)]
pub struct DispatchEnv<'a> {
    pub capabilities: &'a Capabilities,
    pub runtime: &'a RuntimeContext,
    pub strict_template: bool,
}

/// Run one action. `input` is the caller's input for this step, already
/// merged into `ctx`.
pub async fn dispatch(
    node: &Node,
    input: &Map<String, Value>,
    ctx: &mut ExecutionContext,
    env: DispatchEnv<'_>,
) -> Result<StepOutcome, StepError> {
    match &node.kind {
        NodeKind::Blockchain(action) => blockchain::execute(action, ctx, env).await,
        NodeKind::Transfer(action) => transfer::execute(action, ctx, env).await,
        NodeKind::Http(action) => http::execute(action, ctx, env).await,
        NodeKind::Decision(action) => decision::execute(&node.id, action, input, ctx),
        NodeKind::Completion(action) => completion::execute(action, ctx, env),
    }
}
