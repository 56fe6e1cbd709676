//! Fatal errors that stop a generation run before any case executes.

use std::path::PathBuf;

use duet_exec::ExecError;

/// Errors that abort [`crate::Maker::generate`].
///
/// Per-case failures are not errors; they are reported in
/// [`crate::GenerationReport`].
#[derive(Debug, thiserror::Error)]
pub enum MakerError {
    /// The output directory failed a safety check; nothing was deleted.
    #[error("refusing to clean output directory {}: {reason}", path.display())]
    UnsafeOutputDir {
        /// The configured output directory.
        path: PathBuf,
        /// Which check failed.
        reason: &'static str,
    },

    /// No solution file exists at the configured or conventional paths.
    #[error("no solution file found (tried: {})", display_paths(tried))]
    SolutionNotFound {
        /// Every path that was checked, in order.
        tried: Vec<PathBuf>,
    },

    /// The solution could not be compiled or its toolchain located.
    #[error(transparent)]
    Exec(#[from] ExecError),

    /// A filesystem operation on the output directory failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// The path being accessed.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsafe_output_display() {
        let err = MakerError::UnsafeOutputDir {
            path: PathBuf::from("src"),
            reason: "protected directory name",
        };
        assert_eq!(
            err.to_string(),
            "refusing to clean output directory src: protected directory name"
        );
    }

    #[test]
    fn solution_not_found_lists_candidates() {
        let err = MakerError::SolutionNotFound {
            tried: vec![PathBuf::from("std.cpp"), PathBuf::from("std.py")],
        };
        assert_eq!(
            err.to_string(),
            "no solution file found (tried: std.cpp, std.py)"
        );
    }
}
