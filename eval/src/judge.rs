//! Evaluate a case in-process and compare against its expectation.

use anyhow::{Context, Result};
use cfselect::core::types::DecisionKind;
use cfselect::core::value::Value;
use cfselect::host::RenderSink;
use cfselect::io::config::{OutputFormat, SelectConfig};
use cfselect::io::document::parse_document;
use cfselect::io::render::TextRenderer;
use cfselect::select::select;
use serde::Serialize;
use tracing::debug;

use crate::case::CaseFile;

/// Result of running all checks for one case.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Judgment {
    pub checks: Vec<CheckOutcome>,
}

impl Judgment {
    pub fn passed(&self) -> bool {
        self.checks.iter().all(CheckOutcome::passed)
    }
}

/// Outcome of a single comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CheckOutcome {
    Decision {
        passed: bool,
        expected: DecisionKind,
        actual: DecisionKind,
    },
    Output {
        passed: bool,
        expected: String,
        actual: String,
    },
    Projected {
        passed: bool,
        expected: serde_json::Value,
        actual: serde_json::Value,
    },
}

impl CheckOutcome {
    pub fn passed(&self) -> bool {
        match self {
            CheckOutcome::Decision { passed, .. }
            | CheckOutcome::Output { passed, .. }
            | CheckOutcome::Projected { passed, .. } => *passed,
        }
    }
}

/// Run the case through `cfselect` and compare every expectation it sets.
pub fn judge(case: &CaseFile) -> Result<Judgment> {
    let state = Value::from(case.state_json()?);
    let invocation = parse_document(case.doc_json()?, &SelectConfig::default())
        .with_context(|| format!("decode doc for case {}", case.case.id))?;
    let selection = select(&state, &invocation)?;
    let actual_kind = selection.decision.kind();
    let actual_projected = selection.state.to_json();

    let mut renderer = TextRenderer::new(Vec::new(), OutputFormat::Text);
    renderer.render(selection.decision)?;
    let rendered = String::from_utf8(renderer.into_inner()).context("render output utf8")?;
    let actual_output = rendered.trim_end_matches('\n').to_string();
    debug!(case_id = %case.case.id, decision = actual_kind.as_str(), "case evaluated");

    let mut checks = vec![CheckOutcome::Decision {
        passed: actual_kind == case.expect.decision,
        expected: case.expect.decision,
        actual: actual_kind,
    }];
    if let Some(expected) = &case.expect.output {
        checks.push(CheckOutcome::Output {
            passed: *expected == actual_output,
            expected: expected.clone(),
            actual: actual_output,
        });
    }
    if let Some(expected) = &case.expect.projected {
        let expected: serde_json::Value =
            serde_json::from_str(expected).context("parse expect.projected")?;
        checks.push(CheckOutcome::Projected {
            passed: expected == actual_projected,
            expected,
            actual: actual_projected,
        });
    }
    Ok(Judgment { checks })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn case(doc: &str, decision: &str, output: Option<&str>) -> CaseFile {
        let output_line = output
            .map(|text| format!("output = '{text}'\n"))
            .unwrap_or_default();
        let input = format!(
            "state = '{{\"foo\": \"bar\"}}'\ndoc = '{doc}'\n\n[case]\nid = \"t\"\n\n[expect]\ndecision = \"{decision}\"\n{output_line}"
        );
        CaseFile::parse_str(&input).expect("case parses")
    }

    #[test]
    fn matching_case_passes() {
        let judgment =
            judge(&case(r#"{"selector": 123}"#, "echo_value", Some("123"))).expect("judge");
        assert!(judgment.passed());
        assert_eq!(judgment.checks.len(), 2);
    }

    #[test]
    fn wrong_decision_fails() {
        let judgment =
            judge(&case(r#"{"selector": false, "children": "x"}"#, "pass_through", None))
                .expect("judge");
        assert!(!judgment.passed());
        assert_eq!(
            judgment.checks[0],
            CheckOutcome::Decision {
                passed: false,
                expected: DecisionKind::PassThrough,
                actual: DecisionKind::Suppressed,
            }
        );
    }

    #[test]
    fn projected_check_compares_json() {
        let mut case = case(r#"{"selector": {"$select": "/foo"}}"#, "echo_value", Some("bar"));
        case.expect.projected = Some("\"bar\"".to_string());
        let judgment = judge(&case).expect("judge");
        assert!(judgment.passed());
    }
}
