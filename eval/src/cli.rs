//! CLI command implementations.

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use tracing::{debug, info};

use crate::case::discover_cases;
use crate::judge::{CheckOutcome, judge};
use crate::outcome::{Outcome, classify_outcome};

fn cases_dir(repo_root: &Path) -> PathBuf {
    repo_root.join("eval").join("cases")
}

/// List all available cases.
pub fn list_cases(repo_root: &Path) -> Result<()> {
    let cases = discover_cases(&cases_dir(repo_root))?;
    for case in cases {
        println!("{}", case.case.id);
    }
    Ok(())
}

/// Run every case, or only `case_id`. Returns `true` when all selected cases pass.
pub fn run_cases(repo_root: &Path, case_id: Option<&str>) -> Result<bool> {
    let cases = discover_cases(&cases_dir(repo_root))?;
    let selected: Vec<_> = cases
        .into_iter()
        .filter(|case| case_id.is_none_or(|id| case.case.id == id))
        .collect();
    if let Some(id) = case_id
        && selected.is_empty()
    {
        bail!("case {} not found in {}", id, cases_dir(repo_root).display());
    }

    info!(cases = selected.len(), "running cases");
    let mut failures = 0usize;
    for case in &selected {
        debug!(case_id = %case.case.id, "running case");
        let judgment = judge(case);
        let outcome = classify_outcome(&judgment);
        println!("run: case={} outcome={}", case.case.id, outcome.as_str());
        match &judgment {
            Ok(judgment) => {
                for check in judgment.checks.iter().filter(|check| !check.passed()) {
                    println!("  {}", describe_failure(check));
                }
            }
            Err(err) => println!("  error: {:#}", err),
        }
        if outcome != Outcome::Pass {
            failures += 1;
        }
    }
    println!("summary: total={} failed={}", selected.len(), failures);
    Ok(failures == 0)
}

fn describe_failure(check: &CheckOutcome) -> String {
    match check {
        CheckOutcome::Decision {
            expected, actual, ..
        } => format!(
            "decision: expected={} actual={}",
            expected.as_str(),
            actual.as_str()
        ),
        CheckOutcome::Output {
            expected, actual, ..
        } => format!("output: expected={expected:?} actual={actual:?}"),
        CheckOutcome::Projected {
            expected, actual, ..
        } => format!("projected: expected={expected} actual={actual}"),
    }
}
