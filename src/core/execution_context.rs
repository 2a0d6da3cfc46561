//! Mutable key/value state threaded through one flow run.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Key under which the last non-error step result is stored.
pub const LAST_RESULT_KEY: &str = "lastResult";
/// Key holding the id of the most recently dispatched action.
pub const LAST_ACTION_ID_KEY: &str = "lastActionId";
/// Key holding the message of the most recent step error.
pub const LAST_ERROR_KEY: &str = "lastError";
/// Key holding the most recent decision choice.
pub const LAST_CHOICE_KEY: &str = "lastChoice";
/// Object mapping decision action ids to the chosen value.
pub const CHOICES_KEY: &str = "choices";
/// Input key carrying the caller's decision choice.
pub const USER_CHOICE_KEY: &str = "userChoice";

/// Execution context: a JSON object accumulated across steps.
///
/// Values are looked up with dotted paths (`lastResult.data.v`). A missing
/// segment anywhere along the path resolves to `None`; lookups never fail.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExecutionContext {
    values: Map<String, Value>,
}

impl ExecutionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(values: Map<String, Value>) -> Self {
        Self { values }
    }

    /// Build from a JSON value; anything but an object yields an empty context.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(values) => Self { values },
            _ => Self::default(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        self.values.insert(key.into(), value);
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.values.remove(key)
    }

    /// Shallow merge: top-level keys of `input` overwrite existing ones.
    pub fn merge(&mut self, input: Map<String, Value>) {
        for (k, v) in input {
            self.values.insert(k, v);
        }
    }

    /// Resolve a dotted path from the context root.
    ///
    /// Object segments are looked up by key, array segments by numeric index.
    pub fn resolve(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let first = segments.next()?;
        let mut current = self.values.get(first)?;
        for segment in segments {
            current = match current {
                Value::Object(map) => map.get(segment)?,
                Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }
        Some(current)
    }

    /// Record a decision choice under `choices.<node_id>` and `lastChoice`.
    pub fn record_choice(&mut self, node_id: &str, choice: &str) {
        let choices = self
            .values
            .entry(CHOICES_KEY.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !choices.is_object() {
            *choices = Value::Object(Map::new());
        }
        if let Value::Object(map) = choices {
            map.insert(node_id.to_string(), Value::String(choice.to_string()));
        }
        self.set(LAST_CHOICE_KEY, Value::String(choice.to_string()));
    }

    /// Owned copy of the underlying map.
    pub fn snapshot(&self) -> Map<String, Value> {
        self.values.clone()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl From<Map<String, Value>> for ExecutionContext {
    fn from(values: Map<String, Value>) -> Self {
        Self::from_map(values)
    }
}
