//! JSON documents as records.
//!
//! JSON objects implement [`Record`] directly, keyed by their property names.
//! `null` has no rule value: a `null` property, or an array holding a `null`,
//! reads as an absent attribute.

use std::borrow::Cow;

use serde_json::{Map, Number};

use crate::{record::Record, value::Value};

impl Record for Map<String, serde_json::Value> {
    fn attribute(&self, name: &str) -> Option<Value<'_>> {
        self.get(name).and_then(from_json)
    }
}

/// Borrow a JSON value as a rule value.
///
/// ```
/// use rulex::{json, Value};
///
/// let doc = serde_json::json!({"y": [3, 6, 9], "x": 0.5});
/// let value = json::from_json(&doc["y"]).unwrap();
/// assert_eq!(value, Value::from(vec![3i64, 6, 9]));
/// assert_eq!(json::from_json(&serde_json::Value::Null), None);
/// ```
pub fn from_json(value: &serde_json::Value) -> Option<Value<'_>> {
    match value {
        serde_json::Value::Null => None,
        serde_json::Value::Bool(b) => Some(Value::Boolean(*b)),
        serde_json::Value::Number(n) => number(n),
        serde_json::Value::String(s) => Some(Value::String(Cow::Borrowed(s.as_str()))),
        serde_json::Value::Array(items) => items
            .iter()
            .map(from_json)
            .collect::<Option<Vec<_>>>()
            .map(Value::Sequence),
        serde_json::Value::Object(map) => Some(Value::Record(map)),
    }
}

fn number(n: &Number) -> Option<Value<'static>> {
    match n.as_i64() {
        Some(i) => Some(Value::Integer(i)),
        None => n.as_f64().map(Value::Number),
    }
}

/// Convert a rule value back to JSON.
///
/// Records have no JSON form and yield `None`, as does a sequence containing
/// one. Non-finite numbers become `null`.
pub fn to_json(value: &Value<'_>) -> Option<serde_json::Value> {
    match value {
        Value::Number(n) => Some(
            Number::from_f64(*n)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
        ),
        Value::Integer(i) => Some(serde_json::Value::Number((*i).into())),
        Value::Boolean(b) => Some(serde_json::Value::Bool(*b)),
        Value::String(s) => Some(serde_json::Value::String(s.to_string())),
        Value::Sequence(items) => items
            .iter()
            .map(to_json)
            .collect::<Option<Vec<_>>>()
            .map(serde_json::Value::Array),
        Value::Record(_) => None,
    }
}
