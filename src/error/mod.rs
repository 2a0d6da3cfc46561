//! Error types for the action flow engine.
//!
//! - [`GraphValidationError`] — Structural problems found in a flow definition.
//! - [`FlowError`] — Top-level errors for loading and validating flows.
//! - [`StepError`] — Failures raised while dispatching a single action.
//! - [`ErrorCode`] / [`ErrorRetryability`] — Classification used by callers
//!   to choose between retrying a step and aborting the run.

pub mod error_context;
pub mod flow_error;
pub mod step_error;
pub mod validation_error;

pub use error_context::{ErrorCode, ErrorRetryability};
pub use flow_error::FlowError;
pub use step_error::StepError;
pub use validation_error::GraphValidationError;

/// Convenience alias for flow-level results.
pub type FlowResult<T> = Result<T, FlowError>;
/// Convenience alias for step-level results.
pub type StepResult<T> = Result<T, StepError>;
