//! Flat result mapping handed to the presentation layer.

use serde::Serialize;
use serde_json::{Map, Value};

/// Key/value result of one request. Chart series are stored as
/// JSON-encoded strings so they can be embedded as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CalculationContext(Map<String, Value>);

impl CalculationContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: &str, value: impl Into<Value>) {
        self.0.insert(key.to_string(), value.into());
    }

    /// Store `value` as a JSON-encoded string.
    pub fn insert_json_string<T: Serialize>(&mut self, key: &str, value: &T) {
        let encoded = serde_json::to_string(value).unwrap_or_else(|_| "null".to_string());
        self.insert(key, encoded);
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn is_success(&self) -> bool {
        self.get("success").and_then(Value::as_bool).unwrap_or(false)
    }

    pub fn error(&self) -> Option<&str> {
        self.get("error").and_then(Value::as_str)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}
