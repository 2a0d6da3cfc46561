//! Execution status types.

mod result;
mod status;

pub use result::ExecutionResult;
pub use status::{ExecutorState, StepStatus};
