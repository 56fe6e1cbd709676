//! Files that preserve the most recent failing iteration.

use std::path::{Path, PathBuf};

use crate::error::CheckerError;

/// Failing input.
pub const INPUT_FILE: &str = "duet_input.txt";
/// Standard solution output for the failing input.
pub const STD_OUTPUT_FILE: &str = "duet_std_output.txt";
/// Target output, or its error output, for the failing input.
pub const TARGET_OUTPUT_FILE: &str = "duet_target_output.txt";

/// Paths of the three artifact files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureArtifacts {
    /// See [`INPUT_FILE`].
    pub input: PathBuf,
    /// See [`STD_OUTPUT_FILE`].
    pub std_output: PathBuf,
    /// See [`TARGET_OUTPUT_FILE`].
    pub target_output: PathBuf,
}

impl FailureArtifacts {
    /// Artifact paths inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            input: dir.join(INPUT_FILE),
            std_output: dir.join(STD_OUTPUT_FILE),
            target_output: dir.join(TARGET_OUTPUT_FILE),
        }
    }

    /// Overwrites all three files.
    pub fn write(&self, input: &str, std_output: &str, target_output: &str) -> Result<(), CheckerError> {
        for (path, contents) in [
            (&self.input, input),
            (&self.std_output, std_output),
            (&self.target_output, target_output),
        ] {
            std::fs::write(path, contents).map_err(|e| CheckerError::Io {
                path: path.clone(),
                source: e,
            })?;
        }
        Ok(())
    }
}
