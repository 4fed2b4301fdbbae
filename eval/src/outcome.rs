use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::judge::Judgment;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Pass,
    Fail,
    Error,
}

impl Outcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Pass => "pass",
            Outcome::Fail => "fail",
            Outcome::Error => "error",
        }
    }
}

pub fn classify_outcome(judgment: &Result<Judgment>) -> Outcome {
    match judgment {
        Ok(judgment) if judgment.passed() => Outcome::Pass,
        Ok(_) => Outcome::Fail,
        Err(_) => Outcome::Error,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::judge::CheckOutcome;
    use anyhow::anyhow;

    fn judgment(pass: bool) -> Result<Judgment> {
        Ok(Judgment {
            checks: vec![CheckOutcome::Output {
                passed: pass,
                expected: "a".to_string(),
                actual: (if pass { "a" } else { "b" }).to_string(),
            }],
        })
    }

    #[test]
    fn pass_when_checks_pass() {
        assert_eq!(classify_outcome(&judgment(true)), Outcome::Pass);
    }

    #[test]
    fn fail_when_any_check_fails() {
        assert_eq!(classify_outcome(&judgment(false)), Outcome::Fail);
    }

    #[test]
    fn error_when_case_cannot_run() {
        assert_eq!(classify_outcome(&Err(anyhow!("projector failed"))), Outcome::Error);
    }
}
