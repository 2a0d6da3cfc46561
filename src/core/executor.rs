//! Pull-driven flow interpreter.
//!
//! A [`FlowExecutor`] owns one run of a validated [`Flow`]: its position, its
//! [`ExecutionContext`] and its append-only history. Each [`FlowExecutor::step`]
//! call dispatches exactly one action and never fails; dispatch errors come
//! back as `error` results and leave the position unchanged so the caller can
//! retry.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::capabilities::{ChainClient, HttpTransport};
use crate::core::event_bus::FlowEvent;
use crate::core::execution_context::{
    ExecutionContext, LAST_ACTION_ID_KEY, LAST_ERROR_KEY, LAST_RESULT_KEY,
};
use crate::core::runtime_context::RuntimeContext;
use crate::domain::execution::{ExecutionResult, ExecutorState, StepStatus};
use crate::dsl::schema::{Flow, Node};
use crate::dsl::validation::validate_flow;
use crate::error::{FlowError, StepError};
use crate::graph::select_next_node;
use crate::nodes::{dispatch, Capabilities, DispatchEnv, StepOutcome};

/// Configuration for the executor
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutorConfig {
    /// Fail a step on unresolved `{{path}}` placeholders instead of keeping them.
    #[serde(default)]
    pub strict_template: bool,
    /// Upper bound on dispatched steps for one run.
    #[serde(default)]
    pub max_steps: Option<u32>,
}

/// Serializable snapshot of a run, taken between steps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionCheckpoint {
    pub state: ExecutorState,
    pub context: Map<String, Value>,
    pub history: Vec<ExecutionResult>,
    #[serde(default)]
    pub steps_taken: u32,
}

pub struct FlowExecutor {
    flow: Arc<Flow>,
    index: HashMap<String, usize>,
    state: ExecutorState,
    context: ExecutionContext,
    initial_context: Map<String, Value>,
    history: Vec<ExecutionResult>,
    capabilities: Capabilities,
    runtime: RuntimeContext,
    config: ExecutorConfig,
    steps_taken: u32,
}

impl std::fmt::Debug for FlowExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlowExecutor")
            .field("flow", &self.flow.label)
            .field("state", &self.state)
            .field("history_len", &self.history.len())
            .field("steps_taken", &self.steps_taken)
            .finish_non_exhaustive()
    }
}

impl FlowExecutor {
    /// Create a new builder for a flow. The flow is validated by
    /// [`FlowExecutorBuilder::build`].
    pub fn builder(flow: Flow) -> FlowExecutorBuilder {
        FlowExecutorBuilder {
            flow,
            capabilities: Capabilities::default(),
            initial_context: Map::new(),
            config: ExecutorConfig::default(),
            runtime: RuntimeContext::default(),
            checkpoint: None,
        }
    }

    /// Execute the current action once.
    pub async fn step(&mut self, input: Option<Map<String, Value>>) -> ExecutionResult {
        let Some(node_id) = self.state.current_node_id().map(str::to_string) else {
            return ExecutionResult::error("", StepError::NoCurrentAction.to_string());
        };

        if let Some(max) = self.config.max_steps {
            if self.steps_taken >= max {
                tracing::warn!(node_id = %node_id, max_steps = max, "step budget exhausted");
                return ExecutionResult::error(node_id, StepError::MaxStepsExceeded(max).to_string());
            }
        }

        let flow = Arc::clone(&self.flow);
        let Some(node) = self.index.get(&node_id).map(|&i| &flow.nodes[i]) else {
            tracing::warn!(node_id = %node_id, "current action missing from flow");
            return ExecutionResult::error(
                node_id.clone(),
                StepError::ActionNotFound(node_id).to_string(),
            );
        };

        let input = input.unwrap_or_default();
        self.context.merge(input.clone());
        self.steps_taken += 1;

        tracing::debug!(node_id = %node.id, node_type = %node.node_type(), "dispatching action");
        self.runtime.emit(FlowEvent::StepStarted {
            node_id: node.id.clone(),
            timestamp: Utc::now(),
        });

        let env = DispatchEnv {
            capabilities: &self.capabilities,
            runtime: &self.runtime,
            strict_template: self.config.strict_template,
        };
        let result = match dispatch(node, &input, &mut self.context, env).await {
            Ok(outcome) => self.apply_outcome(node, outcome),
            Err(err) => self.apply_failure(node, err),
        };

        self.history.push(result.clone());
        self.runtime.emit(FlowEvent::StepFinished {
            result: result.clone(),
            timestamp: Utc::now(),
        });
        self.emit_state_event(&node.id);
        result
    }

    fn apply_outcome(&mut self, node: &Node, outcome: StepOutcome) -> ExecutionResult {
        self.context
            .set(LAST_ACTION_ID_KEY, Value::String(node.id.clone()));

        match outcome.status {
            StepStatus::Waiting => {
                let result = ExecutionResult {
                    node_id: node.id.clone(),
                    status: StepStatus::Waiting,
                    data: outcome.data,
                    error: None,
                    next_node_id: None,
                };
                self.record_last_result(&result);
                self.state = ExecutorState::WaitingForInput(node.id.clone());
                tracing::debug!(node_id = %node.id, "waiting for input");
                result
            }
            status => {
                let mut result = ExecutionResult {
                    node_id: node.id.clone(),
                    status,
                    data: outcome.data,
                    error: None,
                    next_node_id: None,
                };
                self.record_last_result(&result);

                if node.is_completion() {
                    self.state = ExecutorState::Completed;
                    tracing::info!(node_id = %node.id, "flow completed");
                    return result;
                }

                let next = outcome.next_node_id.or_else(|| {
                    select_next_node(&node.next_actions, &self.context).map(str::to_string)
                });
                match next {
                    Some(next_id) => {
                        tracing::debug!(node_id = %node.id, next_node_id = %next_id, "advancing");
                        result.next_node_id = Some(next_id.clone());
                        self.record_last_result(&result);
                        self.state = ExecutorState::Running(next_id);
                    }
                    None => {
                        tracing::info!(node_id = %node.id, "no next action matched; flow halted");
                        self.state = ExecutorState::Halted;
                    }
                }
                result
            }
        }
    }

    fn apply_failure(&mut self, node: &Node, err: StepError) -> ExecutionResult {
        let message = err.to_string();
        tracing::warn!(
            node_id = %node.id,
            error = %message,
            retryability = ?err.retryability(),
            "action failed"
        );
        self.context
            .set(LAST_ACTION_ID_KEY, Value::String(node.id.clone()));
        self.context
            .set(LAST_ERROR_KEY, Value::String(message.clone()));
        ExecutionResult::error(node.id.clone(), message)
    }

    fn record_last_result(&mut self, result: &ExecutionResult) {
        let value = serde_json::to_value(result).unwrap_or_default();
        self.context.set(LAST_RESULT_KEY, value);
    }

    fn emit_state_event(&self, node_id: &str) {
        let node_id = node_id.to_string();
        let timestamp = Utc::now();
        match &self.state {
            ExecutorState::WaitingForInput(_) => {
                self.runtime
                    .emit(FlowEvent::WaitingForInput { node_id, timestamp })
            }
            ExecutorState::Completed => {
                self.runtime
                    .emit(FlowEvent::FlowCompleted { node_id, timestamp })
            }
            ExecutorState::Halted => self.runtime.emit(FlowEvent::FlowHalted { node_id, timestamp }),
            ExecutorState::Running(_) => {}
        }
    }

    pub fn state(&self) -> &ExecutorState {
        &self.state
    }

    pub fn current_node_id(&self) -> Option<&str> {
        self.state.current_node_id()
    }

    pub fn is_completed(&self) -> bool {
        self.state == ExecutorState::Completed
    }

    /// The run ended because no next action matched, without a completion.
    pub fn is_halted(&self) -> bool {
        self.state == ExecutorState::Halted
    }

    pub fn is_waiting(&self) -> bool {
        matches!(self.state, ExecutorState::WaitingForInput(_))
    }

    /// Owned copy of the context; mutating it does not affect the run.
    pub fn context(&self) -> Map<String, Value> {
        self.context.snapshot()
    }

    /// Owned copy of the step history.
    pub fn history(&self) -> Vec<ExecutionResult> {
        self.history.clone()
    }

    pub fn flow(&self) -> &Flow {
        &self.flow
    }

    pub fn steps_taken(&self) -> u32 {
        self.steps_taken
    }

    /// Restart at the initial action with the initial context.
    pub fn reset(&mut self) {
        self.state = ExecutorState::Running(self.flow.initial_node_id.clone());
        self.context = ExecutionContext::from_map(self.initial_context.clone());
        self.history.clear();
        self.steps_taken = 0;
    }

    pub fn checkpoint(&self) -> ExecutionCheckpoint {
        ExecutionCheckpoint {
            state: self.state.clone(),
            context: self.context.snapshot(),
            history: self.history.clone(),
            steps_taken: self.steps_taken,
        }
    }
}

/// Builder for configuring a [`FlowExecutor`].
pub struct FlowExecutorBuilder {
    flow: Flow,
    capabilities: Capabilities,
    initial_context: Map<String, Value>,
    config: ExecutorConfig,
    runtime: RuntimeContext,
    checkpoint: Option<ExecutionCheckpoint>,
}

impl FlowExecutorBuilder {
    /// Set the chain client used by blockchain and transfer actions.
    pub fn chain_client(mut self, client: Arc<dyn ChainClient>) -> Self {
        self.capabilities.chain = Some(client);
        self
    }

    /// Set the transport used by http actions.
    pub fn http_transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.capabilities.http = Some(transport);
        self
    }

    /// Seed the context; [`FlowExecutor::reset`] returns to these values.
    pub fn initial_context(mut self, values: Map<String, Value>) -> Self {
        self.initial_context = values;
        self
    }

    pub fn config(mut self, config: ExecutorConfig) -> Self {
        self.config = config;
        self
    }

    /// Set clocks, id generation and the event sender.
    pub fn runtime_context(mut self, runtime: RuntimeContext) -> Self {
        self.runtime = runtime;
        self
    }

    /// Continue a run from a checkpoint instead of the initial action.
    pub fn resume_from(mut self, checkpoint: ExecutionCheckpoint) -> Self {
        self.checkpoint = Some(checkpoint);
        self
    }

    /// Validate the flow and build the executor.
    pub fn build(self) -> Result<FlowExecutor, FlowError> {
        let flow = validate_flow(self.flow)?;
        let index = flow
            .nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (node.id.clone(), i))
            .collect();

        let (state, context, history, steps_taken) = match self.checkpoint {
            Some(cp) => (
                cp.state,
                ExecutionContext::from_map(cp.context),
                cp.history,
                cp.steps_taken,
            ),
            None => (
                ExecutorState::Running(flow.initial_node_id.clone()),
                ExecutionContext::from_map(self.initial_context.clone()),
                Vec::new(),
                0,
            ),
        };

        Ok(FlowExecutor {
            flow: Arc::new(flow),
            index,
            state,
            context,
            initial_context: self.initial_context,
            history,
            capabilities: self.capabilities,
            runtime: self.runtime,
            config: self.config,
            steps_taken,
        })
    }
}
