//! Test-only helpers for building values, props, and projectors.

use serde_json::json;

use crate::core::projector::Projector;
use crate::core::types::Props;
use crate::core::value::Value;

/// Convert a `json!` literal into a [`Value`].
pub fn value(json: serde_json::Value) -> Value {
    Value::from(json)
}

/// Build a prop bag from a `json!` object literal.
pub fn props(json: serde_json::Value) -> Props {
    match Value::from(json) {
        Value::Mapping(entries) => entries,
        other => panic!("props must be an object, got {}", other.type_name()),
    }
}

/// Wrap a closure as a function value.
pub fn projector<F>(func: F) -> Value
where
    F: Fn(&Value) -> Value + Send + Sync + 'static,
{
    Value::Function(Projector::new(func))
}

/// Projector returning a constant.
pub fn constant(result: Value) -> Value {
    projector(move |_| result.clone())
}

/// Projector returning `{hello: "world", ...state}`.
pub fn hello_world_spread() -> Value {
    projector(|state| {
        let mut merged = match value(json!({"hello": "world"})) {
            Value::Mapping(entries) => entries,
            _ => unreachable!("literal mapping"),
        };
        if let Value::Mapping(entries) = state {
            merged.extend(entries.clone());
        }
        Value::Mapping(merged)
    })
}
