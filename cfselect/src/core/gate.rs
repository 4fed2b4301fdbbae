//! Render gates over projected values.
//!
//! Mappings and sequences are judged element by element (vacuously true when
//! empty); every other value is judged as a whole.

use crate::core::value::Value;

/// Positive gate: every element truthy, or the value itself truthy.
pub fn is_positive_truthy(projected: &Value) -> bool {
    match projected {
        Value::Mapping(entries) => entries.values().all(Value::is_truthy),
        Value::Sequence(items) => items.iter().all(Value::is_truthy),
        other => other.is_truthy(),
    }
}

/// Negated gate: every element falsy, or the value itself falsy.
pub fn is_negative_falsy(projected: &Value) -> bool {
    match projected {
        Value::Mapping(entries) => !entries.values().any(Value::is_truthy),
        Value::Sequence(items) => !items.iter().any(Value::is_truthy),
        other => !other.is_truthy(),
    }
}

/// Both gates must pass for static content to render.
pub fn gates_pass(positive: &Value, negative: &Value) -> bool {
    is_positive_truthy(positive) && is_negative_falsy(negative)
}
