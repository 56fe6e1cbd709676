//! Check verdicts.

use std::fmt;
use std::fmt::Write as _;
use std::path::PathBuf;
use std::time::Duration;

use crate::artifacts::FailureArtifacts;

/// Why a check stopped early.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The standard solution crashed; the setup is broken, not the target.
    StdRuntimeError,
    /// The target crashed or exited nonzero.
    TargetRuntimeError,
    /// The target exceeded its time limit.
    TimeLimitExceeded,
    /// Both ran but their outputs differ.
    WrongAnswer,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FailureKind::StdRuntimeError => "standard solution runtime error",
            FailureKind::TargetRuntimeError => "runtime error",
            FailureKind::TimeLimitExceeded => "time limit exceeded",
            FailureKind::WrongAnswer => "wrong answer",
        })
    }
}

/// The first failing iteration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    /// What went wrong.
    pub kind: FailureKind,
    /// 1-based iteration number.
    pub iteration: u32,
    /// Human-readable detail (exit status, first differing line).
    pub message: String,
    /// Where the failing case was saved.
    pub artifacts: FailureArtifacts,
}

/// How a check ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    /// Every iteration matched.
    Passed,
    /// The loop stopped at this failure.
    Failed(Failure),
}

/// Summary of a check run.
#[derive(Debug, Clone)]
pub struct CheckReport {
    /// Standard solution source.
    pub std: PathBuf,
    /// Target solution source.
    pub target: PathBuf,
    /// Iterations requested.
    pub planned: u32,
    /// Iterations started, including a failing one.
    pub executed: u32,
    /// Final verdict.
    pub outcome: CheckOutcome,
    /// Longest completed target run.
    pub slowest_target: Duration,
    /// Wall time of the loop.
    pub elapsed: Duration,
}

impl CheckReport {
    /// Returns `true` if every planned iteration passed.
    pub fn passed(&self) -> bool {
        matches!(self.outcome, CheckOutcome::Passed)
    }

    /// The failure, if the loop stopped early.
    pub fn failure(&self) -> Option<&Failure> {
        match &self.outcome {
            CheckOutcome::Passed => None,
            CheckOutcome::Failed(failure) => Some(failure),
        }
    }

    /// Renders the verdict lines.
    pub fn render(&self) -> String {
        let mut out = String::new();
        match &self.outcome {
            CheckOutcome::Passed => {
                let _ = write!(
                    out,
                    "   PASS  {} iteration(s) in {} ms, slowest target run {} ms",
                    self.executed,
                    self.elapsed.as_millis(),
                    self.slowest_target.as_millis()
                );
            }
            CheckOutcome::Failed(failure) => {
                let _ = writeln!(
                    out,
                    "   FAIL  {} on iteration {}/{}: {}",
                    failure.kind, failure.iteration, self.planned, failure.message
                );
                let _ = writeln!(out, "         input:  {}", failure.artifacts.input.display());
                let _ = writeln!(out, "         std:    {}", failure.artifacts.std_output.display());
                let _ = write!(out, "         target: {}", failure.artifacts.target_output.display());
            }
        }
        out
    }

    /// Writes [`Self::render`] to stderr.
    pub fn print(&self) {
        eprintln!("{}", self.render());
    }
}
