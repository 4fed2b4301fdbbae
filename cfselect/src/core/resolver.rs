//! Selector resolution: derive a projected value from state.

use std::collections::BTreeMap;

use anyhow::Result;

use crate::core::descriptor::Descriptor;
use crate::core::value::Value;

/// Resolve `descriptor` against `state`.
///
/// - `Absent` returns `default` untouched.
/// - `Projector` is invoked with `state`; its result is returned verbatim.
/// - `Mapping` / `Sequence` keep their keys and order; function elements are
///   replaced by their result, other elements are copied as-is.
/// - `Literal` is returned as-is.
///
/// The only error is a projector failure, which is returned unchanged.
pub fn resolve(state: &Value, descriptor: &Descriptor, default: Value) -> Result<Value> {
    match descriptor {
        Descriptor::Absent => Ok(default),
        Descriptor::Projector(projector) => projector.project(state),
        Descriptor::Mapping(entries) => {
            let mut projected = BTreeMap::new();
            for (key, element) in entries {
                projected.insert(key.clone(), project_element(state, element)?);
            }
            Ok(Value::Mapping(projected))
        }
        Descriptor::Sequence(items) => items
            .iter()
            .map(|element| project_element(state, element))
            .collect::<Result<Vec<_>>>()
            .map(Value::Sequence),
        Descriptor::Literal(value) => Ok(value.clone()),
    }
}

fn project_element(state: &Value, element: &Value) -> Result<Value> {
    match element {
        Value::Function(projector) => projector.project(state),
        literal => Ok(literal.clone()),
    }
}
