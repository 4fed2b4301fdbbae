//! Render sinks that print decisions.
//!
//! Text output follows how a markup host displays content: `null`,
//! `undefined`, booleans, and functions produce nothing; numbers print in
//! script notation; sequences concatenate their elements.

use std::io::Write;

use anyhow::{Context, Result};
use serde_json::json;

use crate::core::types::RenderDecision;
use crate::core::value::{Value, format_number};
use crate::host::RenderSink;
use crate::io::config::OutputFormat;

/// Display text of a value.
pub fn render_text(value: &Value) -> String {
    match value {
        Value::Undefined | Value::Null | Value::Bool(_) | Value::Function(_) => String::new(),
        Value::Number(number) => format_number(*number),
        Value::String(text) => text.clone(),
        Value::Sequence(items) => items.iter().map(render_text).collect(),
        Value::Mapping(_) => value.to_json().to_string(),
    }
}

/// Writes each decision to `out`, as text or as one JSON object per line.
#[derive(Debug)]
pub struct TextRenderer<W> {
    out: W,
    format: OutputFormat,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W, format: OutputFormat) -> Self {
        Self { out, format }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_text(&mut self, decision: &RenderDecision<Value, String>) -> Result<()> {
        let text = match decision {
            RenderDecision::Callback(output) => output.clone(),
            RenderDecision::PassThrough(content) => render_text(content),
            RenderDecision::EchoValue(value) => render_text(value),
            RenderDecision::Suppressed => return Ok(()),
        };
        writeln!(self.out, "{text}").context("write render output")
    }

    fn write_json(&mut self, decision: &RenderDecision<Value, String>) -> Result<()> {
        let output = match decision {
            RenderDecision::Callback(output) => serde_json::Value::String(output.clone()),
            RenderDecision::PassThrough(value) | RenderDecision::EchoValue(value) => {
                value.to_json()
            }
            RenderDecision::Suppressed => serde_json::Value::Null,
        };
        let line = json!({ "decision": decision.kind(), "output": output });
        writeln!(self.out, "{line}").context("write render output")
    }
}

impl<W: Write> RenderSink<Value, String> for TextRenderer<W> {
    fn render(&mut self, decision: RenderDecision<Value, String>) -> Result<()> {
        match self.format {
            OutputFormat::Text => self.write_text(&decision)?,
            OutputFormat::Json => self.write_json(&decision)?,
        }
        self.out.flush().context("flush render output")
    }
}
