//! # actionflow — nested action flows for embedded mini-apps
//!
//! `actionflow` models multi-step "mini-app" flows as a directed graph of
//! actions and runs them one step at a time:
//!
//! - **Action model**: blockchain calls, transfers, HTTP calls, decisions and
//!   completions, linked by ordered, optionally conditional next-action edges.
//! - **Validation**: three layers (structure, topology, semantics). Unknown
//!   ids, duplicates, unreachable actions and malformed decisions or
//!   completions are rejected before a flow can run.
//! - **Execution**: a pull-driven state machine. The caller supplies input,
//!   the executor dispatches one action, records the result in its context and
//!   history, and picks the next action.
//! - **Templates**: `{{path.to.value}}` placeholders resolved against the
//!   execution context.
//!
//! Chain access and HTTP are supplied by the caller through the
//! [`ChainClient`] and [`HttpTransport`] traits; [`ReqwestTransport`] is a
//! ready-made HTTP implementation.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use actionflow::{load_flow, FlowExecutor, FlowFormat, HttpPoolConfig, ReqwestTransport};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let json = std::fs::read_to_string("flow.json")?;
//!     let flow = load_flow(&json, FlowFormat::Json)?;
//!     let mut executor = FlowExecutor::builder(flow)
//!         .http_transport(Arc::new(ReqwestTransport::new(HttpPoolConfig::default())?))
//!         .build()?;
//!     while executor.current_node_id().is_some() && !executor.is_waiting() {
//!         let result = executor.step(None).await;
//!         println!("{:?}", result);
//!         if !result.is_success() {
//!             break;
//!         }
//!     }
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domain;
pub mod dsl;
pub mod error;
pub mod evaluator;
pub mod graph;
pub mod nodes;
pub mod template;

pub use crate::core::{
    create_event_channel, ChainClient, ContractCall, EventReceiver, EventSender,
    ExecutionCheckpoint, ExecutionContext, ExecutorConfig, FakeIdGenerator, FakeTimeProvider,
    FlowEvent, FlowExecutor, FlowExecutorBuilder, HttpPoolConfig, HttpRequest, HttpTransport,
    IdGenerator, RealIdGenerator, RealTimeProvider, ReqwestTransport, RuntimeContext,
    TimeProvider, TransferRequest,
};
pub use crate::domain::execution::{ExecutionResult, ExecutorState, StepStatus};
pub use crate::dsl::{
    load_flow, load_flow_with_report, parse_flow, validate_flow, validate_report, Diagnostic,
    DiagnosticLevel, Flow, FlowFormat, Node, NodeKind, ValidationReport,
};
pub use crate::error::{FlowError, GraphValidationError, StepError};
pub use crate::evaluator::{evaluate_all, evaluate_condition};
pub use crate::template::substitute;
