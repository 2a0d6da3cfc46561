//! Domain layer — execution outcome types shared by the executor, the step
//! handlers and callers.

pub mod execution;
