//! Case file parsing and validation.
//!
//! Cases are TOML files pairing a state and an invocation document with the
//! expected render decision. See `eval/cases/` for examples.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use cfselect::core::types::DecisionKind;
use serde::Deserialize;

/// A parsed case file.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct CaseFile {
    pub case: CaseMeta,
    /// State as JSON text.
    pub state: String,
    /// Invocation document as JSON text.
    pub doc: String,
    pub expect: Expectation,
}

/// Case metadata.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct CaseMeta {
    /// Unique identifier (slug format: `[a-z0-9_-]+`).
    pub id: String,
    #[serde(default)]
    pub description: String,
}

/// Expected outcome of the selection.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Expectation {
    pub decision: DecisionKind,
    /// Rendered text output (without trailing newline).
    pub output: Option<String>,
    /// Positive projection as JSON text.
    pub projected: Option<String>,
}

impl CaseFile {
    /// Load and validate a case file from the given path.
    pub fn load(path: &Path) -> Result<Self> {
        let contents =
            fs::read_to_string(path).with_context(|| format!("read case {}", path.display()))?;
        Self::parse_str(&contents).with_context(|| format!("load case {}", path.display()))
    }

    pub fn parse_str(contents: &str) -> Result<Self> {
        let case: CaseFile = toml::from_str(contents).context("parse case")?;
        case.validate()?;
        Ok(case)
    }

    /// Parsed state.
    pub fn state_json(&self) -> Result<serde_json::Value> {
        serde_json::from_str(&self.state).context("state must be valid JSON")
    }

    /// Parsed document.
    pub fn doc_json(&self) -> Result<serde_json::Value> {
        serde_json::from_str(&self.doc).context("doc must be valid JSON")
    }

    fn validate(&self) -> Result<()> {
        validate_case_id(&self.case.id)?;
        self.state_json()?;
        if !self.doc_json()?.is_object() {
            bail!("doc must be a JSON object");
        }
        if let Some(projected) = &self.expect.projected {
            serde_json::from_str::<serde_json::Value>(projected)
                .context("expect.projected must be valid JSON")?;
        }
        if self.expect.decision == DecisionKind::Suppressed && self.expect.output.is_some() {
            bail!("expect.output must be omitted when decision is suppressed");
        }
        Ok(())
    }
}

/// Discover and load all case files from a directory.
///
/// Returns cases sorted by id. Errors if duplicate ids are found.
pub fn discover_cases(dir: &Path) -> Result<Vec<CaseFile>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }
    let mut cases = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("read cases dir {}", dir.display()))? {
        let entry = entry.context("read case entry")?;
        let path = entry.path();
        if path.extension().and_then(|ext| ext.to_str()) != Some("toml") {
            continue;
        }
        cases.push(CaseFile::load(&path)?);
    }
    cases.sort_by(|left, right| left.case.id.cmp(&right.case.id));
    for pair in cases.windows(2) {
        if pair[0].case.id == pair[1].case.id {
            return Err(anyhow!("duplicate case.id {}", pair[0].case.id));
        }
    }
    Ok(cases)
}

fn validate_case_id(id: &str) -> Result<()> {
    if id.trim().is_empty() {
        bail!("case.id must be non-empty");
    }
    if !id
        .chars()
        .all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-' || ch == '_')
    {
        bail!("case.id must use [a-z0-9_-] only");
    }
    Ok(())
}
