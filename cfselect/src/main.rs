//! Command-line front end for cfselect.
//!
//! Evaluates invocation documents against JSON state files and prints what a
//! host would render.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use cfselect::core::descriptor::Descriptor;
use cfselect::core::resolver::resolve;
use cfselect::core::types::DecisionKind;
use cfselect::exit_codes;
use cfselect::host::Host;
use cfselect::io::config::{CONFIG_FILE, SelectConfig, load_config};
use cfselect::io::document::{decode_selector, load_document};
use cfselect::io::render::TextRenderer;
use cfselect::io::store::{JsonFileStore, load_state};
use cfselect::logging;

#[derive(Parser)]
#[command(
    name = "cfselect",
    version,
    about = "Declarative selector resolution and conditional rendering"
)]
struct Cli {
    /// Config file (defaults to `cfselect.toml` in the working directory).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Evaluate a document against a state file and print the render output.
    Render {
        /// JSON state file.
        #[arg(long)]
        state: PathBuf,
        /// JSON invocation document.
        #[arg(long)]
        doc: PathBuf,
    },
    /// Print the projection of a selector against a state file.
    Resolve {
        /// JSON state file.
        #[arg(long)]
        state: PathBuf,
        /// Selector as JSON (`$select` markers allowed). Omit for no selector.
        #[arg(long)]
        selector: Option<String>,
    },
    /// Check a document against the schema and decode it.
    Validate {
        /// JSON invocation document.
        #[arg(long)]
        doc: PathBuf,
    },
}

fn main() {
    logging::init();
    match run() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("{:#}", err);
            std::process::exit(exit_codes::INVALID);
        }
    }
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    let config_path = cli.config.unwrap_or_else(|| PathBuf::from(CONFIG_FILE));
    let cfg = load_config(&config_path)?;
    match cli.command {
        Command::Render { state, doc } => cmd_render(&cfg, &state, &doc),
        Command::Resolve { state, selector } => cmd_resolve(&state, selector.as_deref()),
        Command::Validate { doc } => cmd_validate(&cfg, &doc),
    }
}

fn cmd_render(cfg: &SelectConfig, state: &Path, doc: &Path) -> Result<i32> {
    let invocation = load_document(doc, cfg)?;
    let renderer = TextRenderer::new(std::io::stdout().lock(), cfg.output);
    let mut host = Host::new(JsonFileStore::new(state), renderer);
    let kind = host.notify(&invocation)?;
    info!(decision = kind.as_str(), "render finished");
    if kind == DecisionKind::Suppressed {
        return Ok(exit_codes::SUPPRESSED);
    }
    Ok(exit_codes::OK)
}

fn cmd_resolve(state: &Path, selector: Option<&str>) -> Result<i32> {
    let state = load_state(state)?;
    let descriptor = match selector {
        Some(raw) => {
            let json: serde_json::Value = serde_json::from_str(raw).context("parse --selector")?;
            Descriptor::classify(Some(decode_selector(json, "selector")?))
        }
        None => Descriptor::Absent,
    };
    let projected = resolve(&state, &descriptor, state.clone())?;
    if projected.is_undefined() {
        println!("undefined");
    } else {
        let rendered =
            serde_json::to_string_pretty(&projected.to_json()).context("serialize projection")?;
        println!("{rendered}");
    }
    Ok(exit_codes::OK)
}

fn cmd_validate(cfg: &SelectConfig, doc: &Path) -> Result<i32> {
    let invocation = load_document(doc, cfg)?;
    println!(
        "ok: selector={} selectorNot={} children={} props={}",
        invocation.selector.shape().as_str(),
        invocation.selector_not.shape().as_str(),
        invocation.content.kind(),
        invocation.props.len()
    );
    Ok(exit_codes::OK)
}
