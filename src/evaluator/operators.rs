use std::cmp::Ordering;

use serde_json::Value;

/// JSON value equality. Integer and float spellings of the same number are
/// equal; values of different JSON types never are.
pub fn equal(value: &Value, target: &Value) -> bool {
    match (value, target) {
        // int vs float
        (Value::Number(a), Value::Number(b)) => a == b || a.as_f64() == b.as_f64(),
        _ => value == target,
    }
}

/// Ordering between two values, or `None` when they are not comparable.
///
/// Numbers compare numerically and strings lexicographically. Mixed types
/// are not comparable.
pub fn compare(value: &Value, target: &Value) -> Option<Ordering> {
    match (value, target) {
        (Value::Number(a), Value::Number(b)) => a.as_f64()?.partial_cmp(&b.as_f64()?),
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

/// Substring test for strings, membership test for arrays; anything else
/// fails.
pub fn contains(value: &Value, target: &Value) -> bool {
    match (value, target) {
        (Value::String(s), Value::String(t)) => s.contains(t.as_str()),
        (Value::Array(items), _) => items.iter().any(|item| equal(item, target)),
        _ => false,
    }
}
