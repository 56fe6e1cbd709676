//! Maker configuration and solution lookup.

use std::path::{Path, PathBuf};

use duet_config::{DuetConfig, DEFAULT_CACHE_DIR, DEFAULT_OUTPUT_DIR, DEFAULT_START};
use duet_exec::BuildOptions;

use crate::error::MakerError;

/// Conventional reference-solution names, tried in order when none is set.
pub const SOLUTION_FALLBACKS: &[&str] = &[
    "std.cpp", "std.cc", "std.c", "std.rs", "std.go", "std.java", "std.py", "std.js", "std.ts",
];

/// Settings for one generation run.
///
/// Relative paths are resolved against `work_dir`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MakerOptions {
    /// Reference solution; `None` tries [`SOLUTION_FALLBACKS`].
    pub solution: Option<PathBuf>,
    /// Directory receiving `<N>.in`/`<N>.out`.
    pub output_dir: PathBuf,
    /// Number of the first case.
    pub start: u32,
    /// Compiler or interpreter override.
    pub compiler: Option<String>,
    /// Extra compiler flags.
    pub flags: Vec<String>,
    /// Project root.
    pub work_dir: PathBuf,
    /// Compile cache directory.
    pub cache_dir: PathBuf,
    /// Suppress report output on stderr.
    pub quiet: bool,
}

impl Default for MakerOptions {
    fn default() -> Self {
        Self {
            solution: None,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            start: DEFAULT_START,
            compiler: None,
            flags: Vec::new(),
            work_dir: PathBuf::from("."),
            cache_dir: PathBuf::from(DEFAULT_CACHE_DIR),
            quiet: false,
        }
    }
}

impl MakerOptions {
    /// Options taken from a loaded `duet.toml` rooted at `work_dir`.
    pub fn from_config(config: &DuetConfig, work_dir: &Path) -> Self {
        Self {
            solution: config.maker.solution.clone(),
            output_dir: config.maker.output_dir.clone(),
            start: config.maker.start,
            compiler: config.maker.compiler.clone(),
            flags: config.maker.flags.clone(),
            work_dir: work_dir.to_path_buf(),
            cache_dir: config.cache.dir.clone(),
            quiet: false,
        }
    }

    pub(crate) fn build_options(&self) -> BuildOptions {
        BuildOptions {
            compiler: self.compiler.clone(),
            flags: self.flags.clone(),
        }
    }
}

/// Finds the solution file under `root`.
///
/// An explicit path must exist; otherwise the first existing fallback wins.
pub fn resolve_solution(root: &Path, explicit: Option<&Path>) -> Result<PathBuf, MakerError> {
    let candidates: Vec<PathBuf> = match explicit {
        Some(path) => vec![root.join(path)],
        None => SOLUTION_FALLBACKS.iter().map(|name| root.join(name)).collect(),
    };
    match candidates.iter().find(|p| p.is_file()) {
        Some(found) => Ok(found.clone()),
        None => Err(MakerError::SolutionNotFound { tried: candidates }),
    }
}
