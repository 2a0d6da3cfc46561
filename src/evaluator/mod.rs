//! Condition evaluation against an execution context.

pub mod condition;
pub mod operators;

pub use condition::{evaluate_all, evaluate_condition};
