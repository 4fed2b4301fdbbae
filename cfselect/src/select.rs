//! End-to-end selection: resolve both selectors, then decide what to render.

use anyhow::Result;
use tracing::debug;

use crate::core::decider::{Content, decide};
use crate::core::descriptor::Descriptor;
use crate::core::resolver::resolve;
use crate::core::types::{Props, RenderDecision};
use crate::core::value::Value;

/// Prop key of the positive selector.
pub const SELECTOR_KEY: &str = "selector";
/// Prop key of the negated selector.
pub const SELECTOR_NOT_KEY: &str = "selectorNot";
/// Prop key of the content.
pub const CHILDREN_KEY: &str = "children";

/// Everything a caller supplies for one selection, already classified.
#[derive(Debug)]
pub struct Invocation<C, O> {
    pub selector: Descriptor,
    pub selector_not: Descriptor,
    pub content: Content<C, O>,
    /// Remaining props, handed to callback content untouched.
    pub props: Props,
}

impl<C, O> Invocation<C, O> {
    /// Split a caller prop bag into selectors and remaining props.
    ///
    /// A missing selector key yields [`Descriptor::Absent`]; a key holding
    /// `Undefined` yields a literal `Undefined`.
    pub fn from_props(mut props: Props, content: Content<C, O>) -> Self {
        let selector = Descriptor::classify(props.remove(SELECTOR_KEY));
        let selector_not = Descriptor::classify(props.remove(SELECTOR_NOT_KEY));
        props.remove(CHILDREN_KEY);
        Self {
            selector,
            selector_not,
            content,
            props,
        }
    }
}

impl<C: Clone, O> Clone for Invocation<C, O> {
    fn clone(&self) -> Self {
        Self {
            selector: self.selector.clone(),
            selector_not: self.selector_not.clone(),
            content: self.content.clone(),
            props: self.props.clone(),
        }
    }
}

/// Result of one selection.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection<C, O> {
    /// Positive projection.
    pub state: Value,
    /// Negated projection.
    pub state_not: Value,
    pub decision: RenderDecision<C, O>,
}

/// Resolve both selectors. The positive selector defaults to the whole
/// state, the negated selector to `false`.
pub fn map_state(
    state: &Value,
    selector: &Descriptor,
    selector_not: &Descriptor,
) -> Result<(Value, Value)> {
    let projected = resolve(state, selector, state.clone())?;
    let projected_not = resolve(state, selector_not, Value::Bool(false))?;
    Ok((projected, projected_not))
}

/// Run one selection against `state`.
///
/// The invocation is not consumed, so hosts can rerun it on every state
/// change; nothing is retained between calls.
pub fn select<C: Clone, O>(
    state: &Value,
    invocation: &Invocation<C, O>,
) -> Result<Selection<C, O>> {
    debug!(
        selector = invocation.selector.shape().as_str(),
        selector_not = invocation.selector_not.shape().as_str(),
        content = invocation.content.kind(),
        "selecting"
    );
    let (projected, projected_not) =
        map_state(state, &invocation.selector, &invocation.selector_not)?;
    let decision = decide(
        projected.clone(),
        &projected_not,
        invocation.content.clone(),
        &invocation.props,
    )?;
    debug!(decision = decision.kind().as_str(), "selection decided");
    Ok(Selection {
        state: projected,
        state_not: projected_not,
        decision,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::descriptor::Shape;
    use crate::core::projector::Projector;
    use crate::core::types::DecisionKind;
    use crate::test_support::{constant, props};
    use serde_json::json;

    type Markup = Vec<&'static str>;

    fn static_div() -> Content<Markup, String> {
        Content::Static(vec!["<div/>"])
    }

    #[test]
    fn no_selector_projects_whole_state() {
        let state = Value::from(json!({"foo": "bar"}));
        let invocation: Invocation<Markup, String> =
            Invocation::from_props(Props::new(), Content::Absent);
        let selection = select(&state, &invocation).expect("select");
        assert_eq!(selection.state, state);
        assert_eq!(selection.state_not, Value::Bool(false));
        assert_eq!(selection.decision, RenderDecision::EchoValue(state));
    }

    #[test]
    fn from_props_splits_selectors_from_remaining_props() {
        let invocation: Invocation<Markup, String> = Invocation::from_props(
            props(json!({"selector": [1, 2], "selectorNot": false, "children": "x", "title": "t"})),
            Content::Absent,
        );
        assert_eq!(invocation.selector.shape(), Shape::Sequence);
        assert_eq!(invocation.selector_not.shape(), Shape::Literal);
        assert_eq!(invocation.props, props(json!({"title": "t"})));
    }

    #[test]
    fn supplied_undefined_selector_is_not_absent() {
        let mut bag = Props::new();
        bag.insert(SELECTOR_KEY.to_string(), Value::Undefined);
        let invocation: Invocation<Markup, String> = Invocation::from_props(bag, static_div());
        let selection = select(&Value::from(json!({"a": 1})), &invocation).expect("select");
        assert!(selection.state.is_undefined());
        assert_eq!(selection.decision, RenderDecision::Suppressed);
    }

    #[test]
    fn dual_gate_passes_static_content() {
        let invocation = Invocation::from_props(
            props(json!({"selector": true, "selectorNot": false})),
            Content::<Markup, String>::Static(vec!["<div/>", "<div/>", "<div/>"]),
        );
        let selection = select(&Value::from(json!({})), &invocation).expect("select");
        assert_eq!(
            selection.decision,
            RenderDecision::PassThrough(vec!["<div/>", "<div/>", "<div/>"])
        );
    }

    #[test]
    fn negated_selector_suppresses_static_content() {
        let invocation = Invocation::from_props(
            props(json!({"selector": true, "selectorNot": true})),
            static_div(),
        );
        let selection = select(&Value::from(json!({})), &invocation).expect("select");
        assert_eq!(selection.decision.kind(), DecisionKind::Suppressed);
    }

    #[test]
    fn sequence_with_falsy_element_suppresses() {
        let mut bag = Props::new();
        bag.insert(
            SELECTOR_KEY.to_string(),
            Value::Sequence(vec![
                Value::Bool(true),
                Value::Bool(false),
                constant(Value::Bool(true)),
            ]),
        );
        let invocation = Invocation::from_props(bag, static_div());
        let selection = select(&Value::from(json!({})), &invocation).expect("select");
        assert_eq!(selection.state, Value::from(json!([true, false, true])));
        assert_eq!(selection.decision, RenderDecision::Suppressed);
    }

    #[test]
    fn empty_root_state_renders_without_selector() {
        let invocation = Invocation::from_props(Props::new(), static_div());
        let selection = select(&Value::from(json!({})), &invocation).expect("select");
        assert_eq!(selection.decision, RenderDecision::PassThrough(vec!["<div/>"]));
    }

    #[test]
    fn callback_mode_ignores_false_selector() {
        let invocation: Invocation<Markup, String> = Invocation::from_props(
            props(json!({"selector": false, "label": "x"})),
            Content::callback(|value, props| format!("{}={value}", props.len())),
        );
        let selection = select(&Value::Null, &invocation).expect("select");
        assert_eq!(selection.decision, RenderDecision::Callback("1=false".to_string()));
    }

    #[test]
    fn self_closing_echoes_literal() {
        let invocation: Invocation<Markup, String> =
            Invocation::from_props(props(json!({"selector": 123})), Content::Absent);
        let selection = select(&Value::from(json!({"foo": "bar"})), &invocation).expect("select");
        assert_eq!(selection.decision, RenderDecision::EchoValue(Value::from(123)));
    }

    #[test]
    fn invocation_is_reusable_across_states() {
        let mut bag = Props::new();
        bag.insert(SELECTOR_KEY.to_string(), Projector::pointer("/ready").into());
        let invocation = Invocation::from_props(bag, static_div());

        let off = select(&Value::from(json!({"ready": false})), &invocation).expect("select");
        let on = select(&Value::from(json!({"ready": true})), &invocation).expect("select");
        assert_eq!(off.decision.kind(), DecisionKind::Suppressed);
        assert_eq!(on.decision.kind(), DecisionKind::PassThrough);
    }
}
