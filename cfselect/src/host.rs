//! Host collaborator interface.
//!
//! The host owns the state store and the render target. The [`StateSource`]
//! and [`RenderSink`] traits decouple selection from both; tests use
//! in-memory implementations, the CLI uses a JSON file and a text renderer.

use anyhow::Result;
use tracing::{debug, instrument};

use crate::core::types::{DecisionKind, RenderDecision};
use crate::core::value::Value;
use crate::select::{Invocation, select};

/// Supplies the current application state.
pub trait StateSource {
    fn get_state(&self) -> Result<Value>;
}

/// Consumes render decisions.
pub trait RenderSink<C, O> {
    fn render(&mut self, decision: RenderDecision<C, O>) -> Result<()>;
}

/// Wires a state source and a render sink around [`select`].
#[derive(Debug)]
pub struct Host<S, R> {
    source: S,
    sink: R,
}

impl<S, R> Host<S, R> {
    pub fn new(source: S, sink: R) -> Self {
        Self { source, sink }
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn sink(&self) -> &R {
        &self.sink
    }

    /// Handle one state-change notification: read state, select, render.
    ///
    /// Nothing is cached between notifications.
    #[instrument(skip_all)]
    pub fn notify<C: Clone, O>(&mut self, invocation: &Invocation<C, O>) -> Result<DecisionKind>
    where
        S: StateSource,
        R: RenderSink<C, O>,
    {
        let state = self.source.get_state()?;
        let selection = select(&state, invocation)?;
        let kind = selection.decision.kind();
        self.sink.render(selection.decision)?;
        debug!(decision = kind.as_str(), "rendered");
        Ok(kind)
    }
}
