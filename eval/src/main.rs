mod case;
mod cli;
mod judge;
mod outcome;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "eval", version, about = "Golden scenario harness for cfselect")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    List,
    Run {
        /// Run only this case.
        case_id: Option<String>,
    },
}

fn main() -> Result<()> {
    cfselect::logging::init();
    let cli = Cli::parse();
    let repo_root = std::env::current_dir()?;
    match cli.command {
        Command::List => cli::list_cases(&repo_root),
        Command::Run { case_id } => {
            if !cli::run_cases(&repo_root, case_id.as_deref())? {
                std::process::exit(1);
            }
            Ok(())
        }
    }
}
