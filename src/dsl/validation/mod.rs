//! Static flow validation.
//!
//! Checks run in three layers, most fundamental first:
//! 1. structure — non-empty, initial action, unique ids, known targets;
//! 2. topology — every action reachable from the initial action;
//! 3. semantics — decision options present, completion actions terminal.
//!
//! [`validate_flow`] stops at the first error. [`validate_report`] collects
//! every error plus advisory warnings.

mod layer1_structure;
mod layer2_topology;
mod layer3_semantic;
mod types;

use crate::dsl::schema::Flow;
use crate::error::GraphValidationError;

pub use types::{Diagnostic, DiagnosticLevel, ValidationReport};

/// Validate a flow, returning it unchanged on success.
pub fn validate_flow(flow: Flow) -> Result<Flow, GraphValidationError> {
    if let Some(err) = layer1_structure::validate(&flow).into_iter().next() {
        return Err(err);
    }
    if let Some(err) = layer2_topology::validate(&flow).0.into_iter().next() {
        return Err(err);
    }
    if let Some(err) = layer3_semantic::validate(&flow).0.into_iter().next() {
        return Err(err);
    }
    Ok(flow)
}

/// Collect every diagnostic for a flow.
pub fn validate_report(flow: &Flow) -> ValidationReport {
    let mut diagnostics = Vec::new();

    let structure = layer1_structure::validate(flow);
    let has_fatal_structure = structure.iter().any(GraphValidationError::is_fatal_structure);
    diagnostics.extend(structure.iter().map(Diagnostic::from));

    if !has_fatal_structure {
        let (errors, warnings) = layer2_topology::validate(flow);
        diagnostics.extend(errors.iter().map(Diagnostic::from));
        diagnostics.extend(warnings);

        let (errors, warnings) = layer3_semantic::validate(flow);
        diagnostics.extend(errors.iter().map(Diagnostic::from));
        diagnostics.extend(warnings);
    }

    let is_valid = diagnostics
        .iter()
        .all(|d| d.level != DiagnosticLevel::Error);

    ValidationReport {
        is_valid,
        diagnostics,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn flow(v: serde_json::Value) -> Flow {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn test_structure_reported_before_topology() {
        let f = flow(json!({
            "initialActionId": "a",
            "actions": [
                {"id": "a", "type": "completion", "message": "a"},
                {"id": "b", "type": "decision", "options": [], "nextActions": [{"actionId": "ghost"}]}
            ]
        }));
        let err = validate_flow(f.clone()).unwrap_err();
        assert_eq!(err.code(), "E005");

        let report = validate_report(&f);
        assert!(!report.is_valid);
        let codes: Vec<_> = report.errors().iter().map(|d| d.code.clone()).collect();
        assert_eq!(codes, vec!["E005", "E101", "E201"]);
    }

    #[test]
    fn test_fatal_structure_skips_later_layers() {
        let f = flow(json!({
            "initialActionId": "",
            "actions": [{"id": "a", "type": "decision", "options": []}]
        }));
        let report = validate_report(&f);
        assert_eq!(report.diagnostics.len(), 1);
        assert_eq!(report.diagnostics[0].code, "E002");
    }

    #[test]
    fn test_valid_flow_returned_unchanged() {
        let f = flow(json!({
            "label": "ok",
            "initialActionId": "a",
            "actions": [
                {"id": "a", "type": "http", "endpoint": "https://x", "nextActions": [{"actionId": "b"}]},
                {"id": "b", "type": "completion", "message": "done"}
            ]
        }));
        assert_eq!(validate_flow(f.clone()).unwrap(), f);
        let report = validate_report(&f);
        assert!(report.is_valid);
        assert!(report.warnings().is_empty());
    }
}
