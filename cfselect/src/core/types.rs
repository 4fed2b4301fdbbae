//! Shared deterministic types for the selection core.
//!
//! These types define stable contracts between core components and the host.
//! They carry no I/O and must remain deterministic across invocations.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::value::Value;

/// Caller-supplied props other than the selectors and content.
pub type Props = BTreeMap<String, Value>;

/// Outcome of a single selection, interpreted by the host renderer.
///
/// `C` is the host's static content type, `O` the output type of its
/// render callbacks.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderDecision<C, O> {
    /// Output returned by a render callback.
    Callback(O),
    /// Static content passed through unchanged because both gates passed.
    PassThrough(C),
    /// Render nothing.
    Suppressed,
    /// Self-closing usage: the projected value itself.
    EchoValue(Value),
}

impl<C, O> RenderDecision<C, O> {
    pub fn kind(&self) -> DecisionKind {
        match self {
            RenderDecision::Callback(_) => DecisionKind::Callback,
            RenderDecision::PassThrough(_) => DecisionKind::PassThrough,
            RenderDecision::Suppressed => DecisionKind::Suppressed,
            RenderDecision::EchoValue(_) => DecisionKind::EchoValue,
        }
    }
}

/// Tag of a [`RenderDecision`], stable across serialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionKind {
    Callback,
    PassThrough,
    Suppressed,
    EchoValue,
}

impl DecisionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DecisionKind::Callback => "callback",
            DecisionKind::PassThrough => "pass_through",
            DecisionKind::Suppressed => "suppressed",
            DecisionKind::EchoValue => "echo_value",
        }
    }
}
