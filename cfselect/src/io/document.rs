//! Invocation documents: a JSON prop bag with declarative projectors.
//!
//! Functions cannot be stored in a file, so documents use two markers:
//! - `{"$select": "/json/pointer"}` inside `selector` / `selectorNot` becomes a
//!   pointer projector;
//! - `{"$template": "..."}` as `children` becomes a template render callback.
//!
//! Every other key is a remaining prop.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use jsonschema::validator_for;
use tracing::debug;

use crate::core::decider::Content;
use crate::core::projector::Projector;
use crate::core::types::Props;
use crate::core::value::Value;
use crate::io::config::SelectConfig;
use crate::io::template::TemplateEngine;
use crate::select::{CHILDREN_KEY, Invocation, SELECTOR_KEY, SELECTOR_NOT_KEY};

const DOC_SCHEMA: &str = include_str!("../../schemas/select_doc/v1.schema.json");

/// Marker key for pointer projectors.
pub const SELECT_MARKER: &str = "$select";
/// Marker key for template callbacks.
pub const TEMPLATE_MARKER: &str = "$template";

/// Invocation decoded from a document: static children stay JSON-shaped
/// values, callbacks render strings.
pub type DocumentInvocation = Invocation<Value, String>;

/// Load, validate, and decode a document file.
pub fn load_document(path: &Path, cfg: &SelectConfig) -> Result<DocumentInvocation> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read document {}", path.display()))?;
    let json: serde_json::Value = serde_json::from_str(&contents)
        .with_context(|| format!("parse document {}", path.display()))?;
    parse_document(json, cfg).with_context(|| format!("decode document {}", path.display()))
}

/// Validate and decode an in-memory document.
pub fn parse_document(json: serde_json::Value, cfg: &SelectConfig) -> Result<DocumentInvocation> {
    if cfg.validate_schema {
        validate_document(&json)?;
    }
    let serde_json::Value::Object(entries) = json else {
        bail!("document must be a JSON object");
    };

    let engine = TemplateEngine::new(&cfg.template);
    let mut props = Props::new();
    let mut children = None;
    for (key, value) in entries {
        match key.as_str() {
            SELECTOR_KEY | SELECTOR_NOT_KEY => {
                let decoded = decode_selector(value, &key)?;
                props.insert(key, decoded);
            }
            CHILDREN_KEY => children = Some(value),
            _ => {
                props.insert(key, Value::from(value));
            }
        }
    }
    let content = decode_content(children, &engine)?;
    debug!(content = content.kind(), props = props.len(), "document decoded");
    Ok(Invocation::from_props(props, content))
}

/// Check a document against the bundled JSON Schema.
pub fn validate_document(json: &serde_json::Value) -> Result<()> {
    let schema: serde_json::Value =
        serde_json::from_str(DOC_SCHEMA).context("parse document schema")?;
    let compiled = validator_for(&schema).map_err(|err| anyhow!("invalid schema: {}", err))?;
    let messages: Vec<String> = compiled
        .iter_errors(json)
        .map(|err| err.to_string())
        .collect();
    if !messages.is_empty() {
        bail!("document schema validation failed:\n- {}", messages.join("\n- "));
    }
    Ok(())
}

/// Decode a selector value, turning `$select` markers into projectors.
///
/// Markers are accepted as the whole selector or as direct elements of a
/// mapping or sequence selector. Deeper markers are rejected because only
/// first-level projectors are invoked.
pub fn decode_selector(json: serde_json::Value, path: &str) -> Result<Value> {
    if let Some(projector) = decode_marker(&json, path)? {
        return Ok(projector);
    }
    match json {
        serde_json::Value::Object(entries) => entries
            .into_iter()
            .map(|(key, value)| {
                let child = format!("{path}/{key}");
                decode_element(value, &child).map(|decoded| (key, decoded))
            })
            .collect::<Result<_>>()
            .map(Value::Mapping),
        serde_json::Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(index, value)| decode_element(value, &format!("{path}/{index}")))
            .collect::<Result<Vec<_>>>()
            .map(Value::Sequence),
        other => Ok(Value::from(other)),
    }
}

fn decode_element(json: serde_json::Value, path: &str) -> Result<Value> {
    if let Some(projector) = decode_marker(&json, path)? {
        return Ok(projector);
    }
    reject_nested_markers(&json, path)?;
    Ok(Value::from(json))
}

fn decode_marker(json: &serde_json::Value, path: &str) -> Result<Option<Value>> {
    let serde_json::Value::Object(entries) = json else {
        return Ok(None);
    };
    let Some(marker) = entries.get(SELECT_MARKER) else {
        return Ok(None);
    };
    if entries.len() != 1 {
        bail!("{path}: {SELECT_MARKER} marker must be the only key");
    }
    let Some(pointer) = marker.as_str() else {
        bail!("{path}: {SELECT_MARKER} must be a string");
    };
    if !pointer.is_empty() && !pointer.starts_with('/') {
        bail!("{path}: {SELECT_MARKER} must be a JSON pointer, got {pointer:?}");
    }
    Ok(Some(Value::from(Projector::pointer(pointer))))
}

fn reject_nested_markers(json: &serde_json::Value, path: &str) -> Result<()> {
    match json {
        serde_json::Value::Object(entries) => {
            if entries.contains_key(SELECT_MARKER) {
                bail!("{path}: {SELECT_MARKER} is only allowed one level inside a selector");
            }
            for (key, value) in entries {
                reject_nested_markers(value, &format!("{path}/{key}"))?;
            }
            Ok(())
        }
        serde_json::Value::Array(items) => {
            for (index, value) in items.iter().enumerate() {
                reject_nested_markers(value, &format!("{path}/{index}"))?;
            }
            Ok(())
        }
        _ => Ok(()),
    }
}

/// Classify `children`: template callback, static content, or absent.
///
/// Falsy children count as absent, which makes the usage self-closing.
fn decode_content(
    children: Option<serde_json::Value>,
    engine: &TemplateEngine,
) -> Result<Content<Value, String>> {
    let Some(children) = children else {
        return Ok(Content::Absent);
    };
    if let Some(source) = children.get(TEMPLATE_MARKER) {
        let source = source
            .as_str()
            .ok_or_else(|| anyhow!("children: {TEMPLATE_MARKER} must be a string"))?;
        return Ok(Content::Callback(engine.callback(source)?));
    }
    let value = Value::from(children);
    if !value.is_truthy() {
        return Ok(Content::Absent);
    }
    Ok(Content::Static(value))
}
