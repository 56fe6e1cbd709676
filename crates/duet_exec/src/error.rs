//! Error types for building and running programs.

use std::path::PathBuf;

use duet_cache::CacheError;
use duet_toolchain::ToolchainError;

/// Errors raised while preparing or executing a program.
#[derive(Debug, thiserror::Error)]
pub enum ExecError {
    /// The language could not be resolved or no toolchain was found.
    #[error(transparent)]
    Toolchain(#[from] ToolchainError),

    /// Reading the source or writing cache state failed.
    #[error(transparent)]
    Cache(#[from] CacheError),

    /// The source file does not exist.
    #[error("source file not found: {}", path.display())]
    SourceNotFound {
        /// The missing path.
        path: PathBuf,
    },

    /// The compiler ran and rejected the source.
    #[error("compilation of {} failed:\n{message}", source_path.display())]
    CompileFailed {
        /// The source being compiled.
        source_path: PathBuf,
        /// Compiler stderr, or a description when there was none.
        message: String,
    },

    /// A process could not be started.
    #[error("failed to start `{command}`: {source}")]
    Spawn {
        /// The command line that failed.
        command: String,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Waiting on or reading from a running process failed.
    #[error("I/O error while running `{command}`: {source}")]
    Io {
        /// The command line being run.
        command: String,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compile_failed_display_keeps_stderr_verbatim() {
        let err = ExecError::CompileFailed {
            source_path: PathBuf::from("std.cpp"),
            message: "std.cpp:1:1: error: expected ';'".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("compilation of std.cpp failed:"));
        assert!(msg.ends_with("std.cpp:1:1: error: expected ';'"));
    }

    #[test]
    fn toolchain_error_is_transparent() {
        let err: ExecError = ToolchainError::UnsupportedLanguage {
            path: "a.txt".to_string(),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "unsupported source file 'a.txt': unknown extension"
        );
    }

    #[test]
    fn spawn_display() {
        let err = ExecError::Spawn {
            command: "g++ a.cpp".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert!(err.to_string().starts_with("failed to start `g++ a.cpp`"));
    }
}
