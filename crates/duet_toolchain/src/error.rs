//! Error types for toolchain discovery.

/// Errors raised while resolving a language or its toolchain.
#[derive(Debug, thiserror::Error)]
pub enum ToolchainError {
    /// The file extension does not map to any supported language.
    #[error("unsupported source file '{path}': unknown extension")]
    UnsupportedLanguage {
        /// The offending source path.
        path: String,
    },

    /// None of the candidate commands could be run on this host.
    #[error("{hint} (tried: {})", candidates.join(", "))]
    NotFound {
        /// Candidates that were probed, in order.
        candidates: Vec<String>,
        /// Installation guidance for the detected language and platform.
        hint: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_display_lists_candidates() {
        let err = ToolchainError::NotFound {
            candidates: vec!["g++".to_string(), "clang++".to_string()],
            hint: "no C++ toolchain found on PATH".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("no C++ toolchain"));
        assert!(msg.contains("tried: g++, clang++"));
    }

    #[test]
    fn unsupported_display() {
        let err = ToolchainError::UnsupportedLanguage {
            path: "notes.txt".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "unsupported source file 'notes.txt': unknown extension"
        );
    }
}
