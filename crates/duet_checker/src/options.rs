//! Checker configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use duet_config::{CompareMode, DuetConfig, DEFAULT_CACHE_DIR, DEFAULT_TIMEOUT_MS};
use duet_exec::BuildOptions;

/// User-facing checker settings. Relative paths resolve against `work_dir`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckerOptions {
    /// Trusted reference solution. Required.
    pub std: Option<PathBuf>,
    /// Solution under test. Required.
    pub target: Option<PathBuf>,
    /// Compiler or interpreter override for both programs.
    pub compiler: Option<String>,
    /// Extra compiler flags for both programs.
    pub flags: Vec<String>,
    /// How outputs are compared.
    pub compare: CompareMode,
    /// Time limit for each target run. The standard solution is never limited.
    pub timeout: Duration,
    /// Project root; failure artifacts are written here.
    pub work_dir: PathBuf,
    /// Compile cache directory.
    pub cache_dir: PathBuf,
    /// Suppress report output on stderr.
    pub quiet: bool,
}

impl Default for CheckerOptions {
    fn default() -> Self {
        Self {
            std: None,
            target: None,
            compiler: None,
            flags: Vec::new(),
            compare: CompareMode::default(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            work_dir: PathBuf::from("."),
            cache_dir: PathBuf::from(DEFAULT_CACHE_DIR),
            quiet: false,
        }
    }
}

impl CheckerOptions {
    /// Options taken from a loaded `duet.toml` rooted at `work_dir`.
    pub fn from_config(config: &DuetConfig, work_dir: &Path) -> Self {
        let section = &config.checker;
        Self {
            std: section.std.clone(),
            target: section.target.clone(),
            compiler: section.compiler.clone(),
            flags: section.flags.clone(),
            compare: section.compare,
            timeout: Duration::from_millis(section.timeout_ms),
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
