//! Fatal checker errors.

use std::fmt;
use std::path::PathBuf;

use duet_exec::ExecError;

/// Which of the two programs an error concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// The trusted reference solution.
    Std,
    /// The solution under test.
    Target,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Role::Std => "standard solution",
            Role::Target => "target solution",
        })
    }
}

/// Errors that stop a check before or outside the iteration loop.
///
/// Failures found by the loop itself are reported in
/// [`crate::CheckReport`], not here.
#[derive(Debug, thiserror::Error)]
pub enum CheckerError {
    /// `configure` was given no path for one of the programs.
    #[error("no {0} configured")]
    MissingSource(Role),

    /// `run` was called before `configure`.
    #[error("checker is not configured")]
    NotConfigured,

    /// One of the programs could not be prepared.
    #[error("{role}: {source}")]
    Prepare {
        /// Which program failed.
        role: Role,
        /// The underlying compile or toolchain error.
        source: ExecError,
    },

    /// A failure artifact could not be written.
    #[error("failed to write {}: {source}", path.display())]
    Io {
        /// The artifact path.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}
