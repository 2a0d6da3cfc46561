use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde_json::Value;

use crate::core::execution_context::ExecutionContext;
use crate::error::StepError;

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{\s*([^{}]+?)\s*\}\}").expect("placeholder pattern is valid")
});

/// Replace `{{path}}` placeholders in a value.
///
/// Non-string values are returned unchanged. Placeholders whose path does
/// not resolve are kept verbatim.
pub fn substitute(value: &Value, ctx: &ExecutionContext) -> Value {
    match value {
        Value::String(s) => Value::String(substitute_str(s, ctx)),
        other => other.clone(),
    }
}

/// Replace `{{path}}` placeholders in a string, keeping unresolved ones.
pub fn substitute_str(text: &str, ctx: &ExecutionContext) -> String {
    if !text.contains("{{") {
        return text.to_string();
    }
    PLACEHOLDER
        .replace_all(text, |caps: &Captures| match ctx.resolve(&caps[1]) {
            Some(v) => value_to_display(v),
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// Substitute every string nested inside arrays and objects.
pub fn substitute_deep(value: &Value, ctx: &ExecutionContext) -> Value {
    match value {
        Value::String(s) => Value::String(substitute_str(s, ctx)),
        Value::Array(items) => Value::Array(items.iter().map(|v| substitute_deep(v, ctx)).collect()),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), substitute_deep(v, ctx)))
                .collect(),
        ),
        other => other.clone(),
    }
}

/// Render a string, failing on the first unresolved placeholder when
/// `strict` is set.
pub fn render_str(text: &str, ctx: &ExecutionContext, strict: bool) -> Result<String, StepError> {
    if strict {
        if let Some(missing) = extract_paths(text)
            .into_iter()
            .find(|path| ctx.resolve(path).is_none())
        {
            return Err(StepError::VariableNotFound(missing));
        }
    }
    Ok(substitute_str(text, ctx))
}

/// Deep variant of [`render_str`].
pub fn render_value(value: &Value, ctx: &ExecutionContext, strict: bool) -> Result<Value, StepError> {
    match value {
        Value::String(s) => Ok(Value::String(render_str(s, ctx, strict)?)),
        Value::Array(items) => Ok(Value::Array(
            items
                .iter()
                .map(|v| render_value(v, ctx, strict))
                .collect::<Result<_, _>>()?,
        )),
        Value::Object(map) => {
            let mut out = serde_json::Map::with_capacity(map.len());
            for (k, v) in map {
                out.insert(k.clone(), render_value(v, ctx, strict)?);
            }
            Ok(Value::Object(out))
        }
        other => Ok(other.clone()),
    }
}

/// All placeholder paths in a string, in order of appearance.
pub fn extract_paths(text: &str) -> Vec<String> {
    PLACEHOLDER
        .captures_iter(text)
        .map(|cap| cap[1].trim().to_string())
        .collect()
}

/// String form used when splicing a value into text.
pub fn value_to_display(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
