//! Flow document model, parsing and static validation.

pub mod parser;
pub mod schema;
pub mod validation;

pub use parser::{load_flow, load_flow_with_report, parse_flow, FlowFormat};
pub use schema::*;
pub use validation::{
    validate_flow, validate_report, Diagnostic, DiagnosticLevel, ValidationReport,
};
