//! The stress-test loop.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use duet_diff::{compare, first_mismatch, CompareMode};
use duet_exec::{Compiler, ExecError, Program, RunOutput};
use serde_json::Value;

use crate::artifacts::FailureArtifacts;
use crate::error::{CheckerError, Role};
use crate::options::CheckerOptions;
use crate::report::{CheckOutcome, CheckReport, Failure, FailureKind};

/// Validated settings for one checker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckerConfig {
    /// Standard solution, resolved against the work directory.
    pub std: PathBuf,
    /// Target solution, resolved against the work directory.
    pub target: PathBuf,
    /// Everything else, as given.
    pub options: CheckerOptions,
}

/// Returns a fresh, unconfigured [`Checker`].
pub fn create_checker() -> Checker {
    Checker::default()
}

/// Stress-tests a target against a standard solution.
#[derive(Debug, Default)]
pub struct Checker {
    config: Option<CheckerConfig>,
}

impl Checker {
    /// Validates `options` and fixes them for every later run.
    pub fn configure(self, options: CheckerOptions) -> Result<Self, CheckerError> {
        let std = options
            .std
            .as_ref()
            .ok_or(CheckerError::MissingSource(Role::Std))?;
        let target = options
            .target
            .as_ref()
            .ok_or(CheckerError::MissingSource(Role::Target))?;
        let config = CheckerConfig {
            std: options.work_dir.join(std),
            target: options.work_dir.join(target),
            options,
        };
        Ok(Self {
            config: Some(config),
        })
    }

    /// The validated configuration, once [`Self::configure`] succeeded.
    pub fn config(&self) -> Option<&CheckerConfig> {
        self.config.as_ref()
    }

    /// Compiles both programs, then runs up to `iterations` rounds.
    ///
    /// Stops at the first failing round without calling `generator` again;
    /// the failing input and both outputs are written to the artifact files.
    pub fn run<G>(&self, iterations: u32, mut generator: G) -> Result<CheckReport, CheckerError>
    where
        G: FnMut() -> Value,
    {
        let config = self.config.as_ref().ok_or(CheckerError::NotConfigured)?;
        let options = &config.options;

        let mut compiler = Compiler::new(&options.work_dir.join(&options.cache_dir));
        let build = options.build_options();
        let mut prepare = |role: Role, source: &PathBuf| -> Result<Program, CheckerError> {
            if !options.quiet {
                eprintln!("   Compiling {}", source.display());
            }
            compiler
                .prepare(source, &build)
                .map_err(|e| CheckerError::Prepare { role, source: e })
        };
        let std = prepare(Role::Std, &config.std)?;
        let target = prepare(Role::Target, &config.target)?;

        if !options.quiet {
            eprintln!(
                "   Checking {} against {} for {iterations} iteration(s)",
                config.target.display(),
                config.std.display()
            );
        }
        tracing::info!(
            std = %config.std.display(),
            target = %config.target.display(),
            iterations,
            mode = %options.compare,
            "checking"
        );

        let started = Instant::now();
        let mut slowest = Duration::ZERO;
        let mut outcome = CheckOutcome::Passed;
        let mut executed = 0;

        for iteration in 1..=iterations {
            executed = iteration;
            let input = duet_format::format(&generator());
            tracing::debug!(iteration, bytes = input.len(), "iteration");

            let verdict = round(&std, &target, &input, options.timeout, options.compare);
            if let Some(target_out) = &verdict.target {
                slowest = slowest.max(target_out.elapsed);
            }
            if let Some((kind, message)) = verdict.failure {
                let artifacts = FailureArtifacts::in_dir(&options.work_dir);
                artifacts.write(&input, &verdict.std_text, &verdict.target_text)?;
                tracing::info!(iteration, %kind, "check failed");
                outcome = CheckOutcome::Failed(Failure {
                    kind,
                    iteration,
                    message,
                    artifacts,
                });
                break;
            }
        }

        let report = CheckReport {
            std: config.std.clone(),
            target: config.target.clone(),
            planned: iterations,
            executed,
            outcome,
            slowest_target: slowest,
            elapsed: started.elapsed(),
        };
        if !options.quiet {
            report.print();
        }
        Ok(report)
    }
}

/// What one round observed.
struct Verdict {
    failure: Option<(FailureKind, String)>,
    std_text: String,
    target_text: String,
    target: Option<RunOutput>,
}

fn round(std: &Program, target: &Program, input: &str, timeout: Duration, mode: CompareMode) -> Verdict {
    let std_out = match std.run(input, None) {
        Ok(out) if out.success() => out,
        Ok(out) => {
            return Verdict {
                failure: Some((FailureKind::StdRuntimeError, describe(&out))),
                std_text: error_text(&out),
                target_text: String::new(),
                target: None,
            }
        }
        Err(e) => return launch_failure(FailureKind::StdRuntimeError, e, String::new()),
    };

    let target_out = match target.run(input, Some(timeout)) {
        Ok(out) => out,
        Err(e) => return launch_failure(FailureKind::TargetRuntimeError, e, std_out.stdout),
    };

    let failure = if target_out.timed_out() {
        Some((FailureKind::TimeLimitExceeded, describe(&target_out)))
    } else if !target_out.success() {
        Some((FailureKind::TargetRuntimeError, describe(&target_out)))
    } else if !compare(&std_out.stdout, &target_out.stdout, mode) {
        let message = first_mismatch(&std_out.stdout, &target_out.stdout, mode)
            .map(|m| m.to_string())
            .unwrap_or_else(|| "outputs differ".to_string());
        Some((FailureKind::WrongAnswer, message))
    } else {
        None
    };

    let target_text = match &failure {
        Some((FailureKind::WrongAnswer, _)) | None => target_out.stdout.clone(),
        Some(_) => error_text(&target_out),
    };
    Verdict {
        failure,
        std_text: std_out.stdout,
        target_text,
        target: Some(target_out),
    }
}

fn launch_failure(kind: FailureKind, err: ExecError, std_text: String) -> Verdict {
    let message = err.to_string();
    let (std_text, target_text) = match kind {
        FailureKind::StdRuntimeError => (message.clone(), String::new()),
        _ => (std_text, message.clone()),
    };
    Verdict {
        failure: Some((kind, message)),
        std_text,
        target_text,
        target: None,
    }
}

/// Exit status plus the first line of stderr, if any.
fn describe(out: &RunOutput) -> String {
    match out.stderr.lines().find(|l| !l.trim().is_empty()) {
        Some(line) => format!("{}: {}", out.describe_failure(), line.trim()),
        None => out.describe_failure(),
    }
}

/// Whatever a failing run printed, stdout first.
fn error_text(out: &RunOutput) -> String {
    let mut text = out.stdout.clone();
    if !out.stderr.is_empty() {
        if !text.is_empty() && !text.ends_with('\n') {
            text.push('\n');
        }
        text.push_str(&out.stderr);
    }
    text
}
