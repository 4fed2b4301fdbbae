//! Configuration stored in `cfselect.toml`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

/// Default config file name, resolved against the working directory.
pub const CONFIG_FILE: &str = "cfselect.toml";

/// CLI configuration (TOML).
///
/// Missing fields default to the values below.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SelectConfig {
    /// How render output is printed.
    pub output: OutputFormat,

    /// Check documents against the bundled JSON Schema before decoding.
    pub validate_schema: bool,

    pub template: TemplateConfig,
}

/// Render output format.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Plain text, the way a markup host displays content.
    #[default]
    Text,
    /// One JSON object per render.
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TemplateConfig {
    /// Fail when a `$template` references an undefined variable.
    pub strict_undefined: bool,

    /// Reject template output beyond this many bytes.
    pub max_output_bytes: usize,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            strict_undefined: false,
            max_output_bytes: 1_000_000,
        }
    }
}

impl Default for SelectConfig {
    fn default() -> Self {
        Self {
            output: OutputFormat::Text,
            validate_schema: true,
            template: TemplateConfig::default(),
        }
    }
}

impl SelectConfig {
    pub fn validate(&self) -> Result<()> {
        if self.template.max_output_bytes == 0 {
            return Err(anyhow!("template.max_output_bytes must be > 0"));
        }
        Ok(())
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `SelectConfig::default()`.
pub fn load_config(path: &Path) -> Result<SelectConfig> {
    if !path.exists() {
        let cfg = SelectConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: SelectConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Atomically write config to disk (temp file + rename).
pub fn write_config(path: &Path, cfg: &SelectConfig) -> Result<()> {
    cfg.validate()?;
    let mut buf = toml::to_string_pretty(cfg).context("serialize config toml")?;
    buf.push('\n');
    write_atomic(path, &buf)
}

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let parent = path
        .parent()
        .with_context(|| format!("config path missing parent {}", path.display()))?;
    fs::create_dir_all(parent).with_context(|| format!("create directory {}", parent.display()))?;
    let tmp_path = path.with_extension("toml.tmp");
    fs::write(&tmp_path, contents)
        .with_context(|| format!("write temp config {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("replace config {}", path.display()))?;
    Ok(())
}
