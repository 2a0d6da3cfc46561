//! Flow parser: converts raw JSON/YAML/TOML text into a [`Flow`].

use serde_json::Value;

use super::schema::Flow;
use super::validation::{validate_flow, validate_report, ValidationReport};
use crate::error::FlowError;

/// Supported flow document formats.
#[derive(Debug, Clone, Copy)]
pub enum FlowFormat {
    /// JSON format (`.json`).
    Json,
    /// YAML format (`.yaml` / `.yml`).
    Yaml,
    /// TOML format (`.toml`).
    Toml,
}

/// Parse a flow document without validating it.
pub fn parse_flow(content: &str, format: FlowFormat) -> Result<Flow, FlowError> {
    // YAML and TOML go through serde_json::Value first so node payloads
    // (flattened, internally tagged) see the same data model as JSON.
    let value: Value = match format {
        FlowFormat::Json => {
            return serde_json::from_str(content).map_err(|e| FlowError::ParseError(e.to_string()))
        }
        FlowFormat::Yaml => serde_saphyr::from_str(content)
            .map_err(|e| FlowError::ParseError(e.to_string()))?,
        FlowFormat::Toml => {
            let toml_val: toml::Value =
                toml::from_str(content).map_err(|e| FlowError::ParseError(e.to_string()))?;
            toml_value_to_json(toml_val)
        }
    };
    serde_json::from_value(value).map_err(|e| FlowError::ParseError(e.to_string()))
}

/// Parse and validate a flow document.
pub fn load_flow(content: &str, format: FlowFormat) -> Result<Flow, FlowError> {
    let flow = parse_flow(content, format)?;
    Ok(validate_flow(flow)?)
}

/// Parse a flow and run the full report, keeping its warnings.
///
/// Fails with [`FlowError::ValidationFailed`] when the report has errors.
pub fn load_flow_with_report(
    content: &str,
    format: FlowFormat,
) -> Result<(Flow, ValidationReport), FlowError> {
    let flow = parse_flow(content, format)?;
    let report = validate_report(&flow);
    if !report.is_valid {
        return Err(FlowError::ValidationFailed(Box::new(report)));
    }
    Ok((flow, report))
}

/// Convert a [`toml::Value`] into a [`serde_json::Value`].
///
/// TOML has no null type; datetimes are stringified.
fn toml_value_to_json(val: toml::Value) -> Value {
    match val {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => serde_json::json!(i),
        toml::Value::Float(f) => serde_json::json!(f),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Array(arr) => Value::Array(arr.into_iter().map(toml_value_to_json).collect()),
        toml::Value::Table(tbl) => Value::Object(
            tbl.into_iter()
                .map(|(k, v)| (k, toml_value_to_json(v)))
                .collect(),
        ),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
    }
}
