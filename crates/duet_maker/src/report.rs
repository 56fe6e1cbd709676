//! Per-case outcomes and the run summary.

use std::fmt::Write as _;
use std::path::PathBuf;
use std::time::Duration;

/// Outcome of one generated case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationResult {
    /// Case number, used as the file stem.
    pub number: u32,
    /// Optional label given when the case was queued.
    pub label: Option<String>,
    /// Whether both files were written.
    pub success: bool,
    /// What went wrong, when `success` is false.
    pub error: Option<String>,
    /// Time from generator call to `.out` write.
    pub elapsed: Duration,
}

impl GenerationResult {
    /// Display name: `<N>.in`, with the label when one was given.
    pub fn name(&self) -> String {
        match &self.label {
            Some(label) => format!("{}.in [{label}]", self.number),
            None => format!("{}.in", self.number),
        }
    }

    fn line(&self) -> String {
        match (&self.success, &self.error) {
            (true, _) => format!("   PASS  {} ({} ms)", self.name(), self.elapsed.as_millis()),
            (false, Some(err)) => format!("   FAIL  {}: {err}", self.name()),
            (false, None) => format!("   FAIL  {}", self.name()),
        }
    }
}

/// Everything a generation run produced.
#[derive(Debug, Clone)]
pub struct GenerationReport {
    /// Resolved output directory.
    pub output_dir: PathBuf,
    /// Solution that produced the `.out` files.
    pub solution: PathBuf,
    /// Results in queue order.
    pub results: Vec<GenerationResult>,
    /// Wall time for the whole case phase.
    pub elapsed: Duration,
}

impl GenerationReport {
    /// Number of cases that produced both files.
    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|r| r.success).count()
    }

    /// Number of cases that failed.
    pub fn failed(&self) -> usize {
        self.results.len() - self.succeeded()
    }

    /// Returns `true` if no case failed.
    pub fn all_succeeded(&self) -> bool {
        self.failed() == 0
    }

    /// Renders per-case lines followed by the summary.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for result in &self.results {
            let _ = writeln!(out, "{}", result.line());
        }
        let _ = writeln!(out);
        let _ = write!(
            out,
            "   Result: {} passed, {} failed out of {} case(s) in {} ms",
            self.succeeded(),
            self.failed(),
            self.results.len(),
            self.elapsed.as_millis()
        );
        out
    }

    /// Writes [`Self::render`] to stderr.
    pub fn print(&self) {
        eprintln!("{}", self.render());
    }
}
