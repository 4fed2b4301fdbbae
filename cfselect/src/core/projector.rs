//! Projector functions: `state -> derived value`.

use std::fmt;
use std::sync::Arc;

use anyhow::Result;

use crate::core::value::Value;

type ProjectFn = dyn Fn(&Value) -> Result<Value> + Send + Sync;

/// Shared handle to a projector function.
///
/// Cloning is cheap; clones compare equal under [`Projector::ptr_eq`].
#[derive(Clone)]
pub struct Projector {
    label: Arc<str>,
    func: Arc<ProjectFn>,
}

impl Projector {
    /// Wrap an infallible closure.
    pub fn new<F>(func: F) -> Self
    where
        F: Fn(&Value) -> Value + Send + Sync + 'static,
    {
        Self::fallible(move |state| Ok(func(state)))
    }

    /// Wrap a closure that may fail. Failures propagate unchanged to the caller
    /// of [`resolve`](crate::core::resolver::resolve).
    pub fn fallible<F>(func: F) -> Self
    where
        F: Fn(&Value) -> Result<Value> + Send + Sync + 'static,
    {
        Self {
            label: Arc::from("closure"),
            func: Arc::new(func),
        }
    }

    /// Projector reading the state at a JSON pointer; `Undefined` when missing.
    pub fn pointer(pointer: impl Into<String>) -> Self {
        let pointer = pointer.into();
        let label = format!("pointer:{pointer}");
        let func = move |state: &Value| Ok(state.pointer(&pointer).cloned().unwrap_or_default());
        Self {
            label: Arc::from(label),
            func: Arc::new(func),
        }
    }

    /// Invoke the projector against `state`.
    pub fn project(&self, state: &Value) -> Result<Value> {
        (self.func)(state)
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn ptr_eq(&self, other: &Projector) -> bool {
        Arc::ptr_eq(&self.func, &other.func)
    }
}

impl PartialEq for Projector {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for Projector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Projector").field(&self.label).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use serde_json::json;

    #[test]
    fn pointer_projector_reads_nested_state() {
        let state = Value::from(json!({"user": {"name": "ada"}}));
        let projector = Projector::pointer("/user/name");
        assert_eq!(projector.project(&state).expect("project"), Value::from("ada"));
        assert_eq!(projector.label(), "pointer:/user/name");
    }

    #[test]
    fn pointer_projector_yields_undefined_when_missing() {
        let state = Value::from(json!({"user": null}));
        let projected = Projector::pointer("/user/name").project(&state).expect("project");
        assert!(projected.is_undefined());
    }

    #[test]
    fn fallible_projector_surfaces_error() {
        let projector = Projector::fallible(|_| Err(anyhow!("boom")));
        let err = projector.project(&Value::Null).expect_err("fails");
        assert_eq!(err.to_string(), "boom");
    }
}
