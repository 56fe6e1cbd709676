//! The case queue and the generation pipeline.

use std::fs;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::Path;
use std::time::Instant;

use duet_exec::{Compiler, Program};
use rayon::prelude::*;
use serde_json::Value;

use crate::environment::prepare_environment;
use crate::error::MakerError;
use crate::options::{resolve_solution, MakerOptions};
use crate::report::{GenerationReport, GenerationResult};

type Generator = Box<dyn Fn() -> Value + Send + Sync>;

/// One queued case: a generator and an optional label.
pub struct Case {
    label: Option<String>,
    generator: Generator,
}

impl Case {
    /// An unlabeled case.
    pub fn new<F>(generator: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        Self {
            label: None,
            generator: Box::new(generator),
        }
    }

    /// A case with a label shown in the report.
    pub fn labeled<F>(label: impl Into<String>, generator: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        Self {
            label: Some(label.into()),
            generator: Box::new(generator),
        }
    }

    /// The case label, if any.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

impl std::fmt::Debug for Case {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Case").field("label", &self.label).finish_non_exhaustive()
    }
}

/// Returns a fresh, unconfigured [`Maker`].
pub fn create_maker() -> Maker {
    Maker::new()
}

/// Builder for a generation run.
#[derive(Debug, Default)]
pub struct Maker {
    options: MakerOptions,
    queue: Vec<Case>,
}

impl Maker {
    /// A maker with default options and an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the options.
    pub fn configure(mut self, options: MakerOptions) -> Self {
        self.options = options;
        self
    }

    /// Current options.
    pub fn options(&self) -> &MakerOptions {
        &self.options
    }

    /// Queues an unlabeled case.
    pub fn case<F>(mut self, generator: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        self.queue.push(Case::new(generator));
        self
    }

    /// Queues a labeled case.
    pub fn labeled_case<F>(mut self, label: impl Into<String>, generator: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        self.queue.push(Case::labeled(label, generator));
        self
    }

    /// Queues several prebuilt cases in order.
    pub fn cases<I>(mut self, cases: I) -> Self
    where
        I: IntoIterator<Item = Case>,
    {
        self.queue.extend(cases);
        self
    }

    /// Number of queued cases.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Returns `true` if no case is queued.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Cleans the output directory, compiles the solution, and runs every
    /// queued case.
    ///
    /// Case `i` (0-based queue position) is written as `<start + i>.in` and
    /// `<start + i>.out`, whether or not earlier cases failed.
    pub fn generate(self) -> Result<GenerationReport, MakerError> {
        let Maker { options, queue } = self;
        let root = options.work_dir.as_path();

        let output_dir = prepare_environment(root, &options.output_dir)?;
        let solution = resolve_solution(root, options.solution.as_deref())?;

        if !options.quiet {
            eprintln!("   Compiling {}", solution.display());
        }
        let mut compiler = Compiler::new(&root.join(&options.cache_dir));
        let program = compiler.prepare(&solution, &options.build_options())?;
        tracing::info!(
            solution = %solution.display(),
            cached = program.cached,
            cases = queue.len(),
            "generating"
        );
        if !options.quiet {
            eprintln!(
                "   Generating {} case(s) into {}",
                queue.len(),
                output_dir.display()
            );
        }

        let batch = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        let numbered: Vec<(u32, Case)> = queue
            .into_iter()
            .enumerate()
            .map(|(i, case)| (options.start.saturating_add(i as u32), case))
            .collect();

        let started = Instant::now();
        let mut results = Vec::with_capacity(numbered.len());
        for (index, chunk) in numbered.chunks(batch).enumerate() {
            tracing::debug!(batch = index, size = chunk.len(), "running batch");
            let outcomes: Vec<GenerationResult> = chunk
                .par_iter()
                .map(|(number, case)| run_case(*number, case, &program, &output_dir))
                .collect();
            results.extend(outcomes);
        }

        let report = GenerationReport {
            output_dir,
            solution,
            results,
            elapsed: started.elapsed(),
        };
        if !options.quiet {
            report.print();
        }
        Ok(report)
    }
}

fn run_case(number: u32, case: &Case, program: &Program, output_dir: &Path) -> GenerationResult {
    let started = Instant::now();
    let outcome = produce(number, case, program, output_dir);
    if let Err(err) = &outcome {
        tracing::debug!(case = number, error = %err, "case failed");
    }
    GenerationResult {
        number,
        label: case.label.clone(),
        success: outcome.is_ok(),
        error: outcome.err(),
        elapsed: started.elapsed(),
    }
}

fn produce(number: u32, case: &Case, program: &Program, output_dir: &Path) -> Result<(), String> {
    let value = catch_unwind(AssertUnwindSafe(|| (case.generator)()))
        .map_err(|_| "generator panicked".to_string())?;
    let input = duet_format::format(&value);

    let in_path = output_dir.join(format!("{number}.in"));
    fs::write(&in_path, &input).map_err(|e| format!("writing {}: {e}", in_path.display()))?;

    let out = program.run(&input, None).map_err(|e| e.to_string())?;
    if !out.success() {
        let detail = out.stderr.trim();
        return Err(if detail.is_empty() {
            format!("solution {}", out.describe_failure())
        } else {
            format!("solution {}: {detail}", out.describe_failure())
        });
    }

    let out_path = output_dir.join(format!("{number}.out"));
    fs::write(&out_path, &out.stdout).map_err(|e| format!("writing {}: {e}", out_path.display()))
}
