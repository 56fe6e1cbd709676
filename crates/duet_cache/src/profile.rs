//! Per-request compilation profile: effective flags plus their fingerprint.

use std::path::Path;

use duet_common::Fingerprint;

use crate::error::CacheError;

/// The effective flags of one compile request and the fingerprint over
/// source bytes, compiler command, and those flags.
///
/// Never persisted on its own; recomputed from the current file contents on
/// every compile attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilationProfile {
    /// Digest of `source ++ compiler ++ flags...`.
    pub fingerprint: Fingerprint,
    /// Language defaults followed by user flags, without deduplication.
    pub flags: Vec<String>,
}

impl CompilationProfile {
    /// Computes a profile from in-memory source bytes.
    pub fn compute(
        source: &[u8],
        compiler: &str,
        default_flags: &[&str],
        user_flags: &[String],
    ) -> Self {
        let flags: Vec<String> = default_flags
            .iter()
            .map(|f| f.to_string())
            .chain(user_flags.iter().cloned())
            .collect();
        let fingerprint = Fingerprint::from_parts(
            std::iter::once(source)
                .chain(std::iter::once(compiler.as_bytes()))
                .chain(flags.iter().map(|f| f.as_bytes())),
        );
        Self { fingerprint, flags }
    }

    /// Reads `source_path` and computes its profile.
    pub fn for_file(
        source_path: &Path,
        compiler: &str,
        default_flags: &[&str],
        user_flags: &[String],
    ) -> Result<Self, CacheError> {
        let source = std::fs::read(source_path).map_err(|e| CacheError::Io {
            path: source_path.to_path_buf(),
            source: e,
        })?;
        Ok(Self::compute(&source, compiler, default_flags, user_flags))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SRC: &[u8] = b"int main() { return 0; }";

    #[test]
    fn defaults_precede_user_flags() {
        let p = CompilationProfile::compute(SRC, "g++", &["-O2"], &["-g".to_string()]);
        assert_eq!(p.flags, vec!["-O2", "-g"]);
    }

    #[test]
    fn duplicates_are_kept() {
        let p = CompilationProfile::compute(SRC, "g++", &["-O2"], &["-O2".to_string()]);
        assert_eq!(p.flags, vec!["-O2", "-O2"]);
    }

    #[test]
    fn identical_inputs_identical_fingerprint() {
        let a = CompilationProfile::compute(SRC, "g++", &["-O2"], &[]);
        let b = CompilationProfile::compute(SRC, "g++", &["-O2"], &[]);
        assert_eq!(a.fingerprint, b.fingerprint);
    }

    #[test]
    fn any_single_change_alters_fingerprint() {
        let base = CompilationProfile::compute(SRC, "g++", &["-O2"], &[]).fingerprint;
        let edited = CompilationProfile::compute(b"int main() { return 1; }", "g++", &["-O2"], &[]);
        let compiler = CompilationProfile::compute(SRC, "clang++", &["-O2"], &[]);
        let flag = CompilationProfile::compute(SRC, "g++", &["-O3"], &[]);
        let extra = CompilationProfile::compute(SRC, "g++", &["-O2"], &["-g".to_string()]);
        for other in [edited, compiler, flag, extra] {
            assert_ne!(base, other.fingerprint);
            assert_ne!(base.short(), other.fingerprint.short());
        }
    }

    #[test]
    fn for_file_reads_current_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.cpp");
        std::fs::write(&path, SRC).unwrap();
        let first = CompilationProfile::for_file(&path, "g++", &[], &[]).unwrap();
        std::fs::write(&path, b"// changed").unwrap();
        let second = CompilationProfile::for_file(&path, "g++", &[], &[]).unwrap();
        assert_ne!(first.fingerprint, second.fingerprint);
    }

    #[test]
    fn for_file_missing_source_errors() {
        let err = CompilationProfile::for_file(Path::new("/nonexistent/a.cpp"), "g++", &[], &[]);
        assert!(matches!(err, Err(CacheError::Io { .. })));
    }
}
