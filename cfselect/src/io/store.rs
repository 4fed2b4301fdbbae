//! State sources backing the host.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use crate::core::value::Value;
use crate::host::StateSource;

/// State held in memory and replaced wholesale by the host.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Value,
}

impl MemoryStore {
    pub fn new(state: Value) -> Self {
        Self { state }
    }

    pub fn set_state(&mut self, state: Value) {
        self.state = state;
    }
}

impl StateSource for MemoryStore {
    fn get_state(&self) -> Result<Value> {
        Ok(self.state.clone())
    }
}

/// State read from a JSON file on every call.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl StateSource for JsonFileStore {
    fn get_state(&self) -> Result<Value> {
        load_state(&self.path)
    }
}

/// Load a JSON state file.
pub fn load_state(path: &Path) -> Result<Value> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read state {}", path.display()))?;
    let json: serde_json::Value = serde_json::from_str(&contents)
        .with_context(|| format!("parse state {}", path.display()))?;
    debug!(path = %path.display(), "state loaded");
    Ok(Value::from(json))
}
