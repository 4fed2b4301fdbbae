//! Conditional render decision.
//!
//! Dispatch order:
//! 1. callback content is invoked with the positive projection, gates ignored;
//! 2. static content passes through when both gates pass;
//! 3. static content is suppressed otherwise;
//! 4. without content the positive projection is echoed unless undefined.

use std::fmt;
use std::sync::Arc;

use anyhow::Result;

use crate::core::gate::gates_pass;
use crate::core::types::{Props, RenderDecision};
use crate::core::value::Value;

type CallbackFn<O> = dyn Fn(&Value, &Props) -> Result<O> + Send + Sync;

/// Render-prop callback: `(projected, remaining props) -> output`.
pub struct RenderCallback<O> {
    func: Arc<CallbackFn<O>>,
}

impl<O> RenderCallback<O> {
    pub fn new<F>(func: F) -> Self
    where
        F: Fn(&Value, &Props) -> O + Send + Sync + 'static,
    {
        Self::fallible(move |value, props| Ok(func(value, props)))
    }

    pub fn fallible<F>(func: F) -> Self
    where
        F: Fn(&Value, &Props) -> Result<O> + Send + Sync + 'static,
    {
        Self {
            func: Arc::new(func),
        }
    }

    pub fn call(&self, projected: &Value, props: &Props) -> Result<O> {
        (self.func)(projected, props)
    }
}

impl<O> Clone for RenderCallback<O> {
    fn clone(&self) -> Self {
        Self {
            func: Arc::clone(&self.func),
        }
    }
}

impl<O> fmt::Debug for RenderCallback<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RenderCallback(..)")
    }
}

/// Content supplied by the caller, classified once at the boundary.
pub enum Content<C, O> {
    /// Self-closing usage.
    Absent,
    Callback(RenderCallback<O>),
    Static(C),
}

impl<C, O> Content<C, O> {
    pub fn callback<F>(func: F) -> Self
    where
        F: Fn(&Value, &Props) -> O + Send + Sync + 'static,
    {
        Content::Callback(RenderCallback::new(func))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Content::Absent => "absent",
            Content::Callback(_) => "callback",
            Content::Static(_) => "static",
        }
    }
}

impl<C: Clone, O> Clone for Content<C, O> {
    fn clone(&self) -> Self {
        match self {
            Content::Absent => Content::Absent,
            Content::Callback(callback) => Content::Callback(callback.clone()),
            Content::Static(content) => Content::Static(content.clone()),
        }
    }
}

impl<C: fmt::Debug, O> fmt::Debug for Content<C, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Content::Absent => f.write_str("Absent"),
            Content::Callback(callback) => f.debug_tuple("Callback").field(callback).finish(),
            Content::Static(content) => f.debug_tuple("Static").field(content).finish(),
        }
    }
}

/// Decide what to render from the two projections and the content.
///
/// Only callback failures can make this return an error.
pub fn decide<C, O>(
    positive: Value,
    negative: &Value,
    content: Content<C, O>,
    props: &Props,
) -> Result<RenderDecision<C, O>> {
    let decision = match content {
        Content::Callback(callback) => RenderDecision::Callback(callback.call(&positive, props)?),
        Content::Static(content) if gates_pass(&positive, negative) => {
            RenderDecision::PassThrough(content)
        }
        Content::Static(_) => RenderDecision::Suppressed,
        Content::Absent if positive.is_undefined() => RenderDecision::Suppressed,
        Content::Absent => RenderDecision::EchoValue(positive),
    };
    Ok(decision)
}
