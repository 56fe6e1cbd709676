//! High-level compile cache.
//!
//! The `CompileCache` ties the manifest to the artifact directories and
//! answers the two questions a compiler invocation asks: "is there still a
//! valid artifact for this profile?" and "where should a fresh one go?".

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::error::CacheError;
use crate::manifest::{cache_key, CacheEntry, CacheManifest};
use crate::profile::CompilationProfile;

/// Default cache directory, relative to the project root.
pub const DEFAULT_CACHE_DIR: &str = ".duet";

/// Subdirectory for native executables.
pub const BIN_SUBDIR: &str = "bin";

/// Subdirectory for class-output directories.
pub const CLASSES_SUBDIR: &str = "classes";

/// Shape of the artifact a compiler produces.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArtifactKind {
    /// A single native executable.
    Executable,
    /// A directory of compiled classes.
    ClassDirectory,
}

/// Compile cache rooted at one directory.
///
/// Single-writer: every [`record`](Self::record) re-reads the manifest from
/// disk, merges its entry, and writes the whole map back.
pub struct CompileCache {
    /// Root directory for the manifest and artifacts.
    cache_dir: PathBuf,

    /// The manifest as of the last load or write.
    manifest: CacheManifest,
}

impl CompileCache {
    /// Loads an existing cache or starts an empty one. Never fails.
    pub fn load_or_create(cache_dir: &Path) -> Self {
        Self {
            cache_dir: cache_dir.to_path_buf(),
            manifest: CacheManifest::load_or_default(cache_dir),
        }
    }

    /// Returns the cache root directory.
    pub fn dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Returns a reference to the current manifest.
    pub fn manifest(&self) -> &CacheManifest {
        &self.manifest
    }

    /// Returns the live artifact for `source` built by `compiler`, if the
    /// stored fingerprint matches `profile` and the artifact still exists.
    pub fn lookup(
        &self,
        source: &Path,
        compiler: &str,
        profile: &CompilationProfile,
    ) -> Option<PathBuf> {
        let key = cache_key(source, compiler);
        let entry = self.manifest.get(&key)?;
        if entry.hash != profile.fingerprint {
            tracing::debug!(%key, "cache miss: fingerprint changed");
            return None;
        }
        if !entry.executable_path.exists() {
            tracing::debug!(%key, path = %entry.executable_path.display(), "cache miss: artifact missing");
            return None;
        }
        tracing::debug!(%key, "cache hit");
        Some(entry.executable_path.clone())
    }

    /// Returns where an artifact for `profile` should be written.
    ///
    /// The name embeds the first eight hex digits of the fingerprint, plus
    /// the host executable suffix for native binaries.
    pub fn artifact_path(&self, stem: &str, profile: &CompilationProfile, kind: ArtifactKind) -> PathBuf {
        let name = format!("{stem}-{}", profile.fingerprint.short());
        match kind {
            ArtifactKind::Executable => self
                .cache_dir
                .join(BIN_SUBDIR)
                .join(format!("{name}{}", std::env::consts::EXE_SUFFIX)),
            ArtifactKind::ClassDirectory => self.cache_dir.join(CLASSES_SUBDIR).join(name),
        }
    }

    /// Creates the parent directory for native artifacts, or the class
    /// directory itself, so the compiler can write into it.
    pub fn prepare(&self, artifact: &Path, kind: ArtifactKind) -> Result<(), CacheError> {
        let dir = match kind {
            ArtifactKind::Executable => artifact.parent().unwrap_or(&self.cache_dir),
            ArtifactKind::ClassDirectory => artifact,
        };
        std::fs::create_dir_all(dir).map_err(|e| CacheError::Io {
            path: dir.to_path_buf(),
            source: e,
        })
    }

    /// Records a successful compile and persists the manifest.
    pub fn record(
        &mut self,
        source: &Path,
        compiler: &str,
        profile: &CompilationProfile,
        artifact: &Path,
    ) -> Result<(), CacheError> {
        let mut manifest = CacheManifest::load_or_default(&self.cache_dir);
        manifest.insert(
            cache_key(source, compiler),
            CacheEntry {
                hash: profile.fingerprint,
                executable_path: artifact.to_path_buf(),
            },
        );
        manifest.save(&self.cache_dir)?;
        self.manifest = manifest;
        Ok(())
    }

    /// Lists `(key, entry)` pairs in key order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &CacheEntry)> {
        self.manifest
            .entries
            .iter()
            .map(|(k, v)| (k.as_str(), v))
    }

    /// Drops every entry and persists the empty manifest. Artifacts are left
    /// for [`gc`](Self::gc).
    pub fn clear(&mut self) -> Result<(), CacheError> {
        self.manifest = CacheManifest::new();
        self.manifest.save(&self.cache_dir)
    }

    /// Removes artifacts that no manifest entry references.
    ///
    /// Scans the binary and class subdirectories and deletes anything not
    /// named by a live entry. Returns the number of artifacts removed.
    pub fn gc(&self) -> Result<usize, CacheError> {
        let live: HashSet<PathBuf> = self
            .manifest
            .entries
            .values()
            .map(|e| e.executable_path.clone())
            .collect();

        let mut removed = 0;
        for subdir in [BIN_SUBDIR, CLASSES_SUBDIR] {
            let dir = self.cache_dir.join(subdir);
            if !dir.exists() {
                continue;
            }
            let io_err = |path: &Path| {
                let path = path.to_path_buf();
                move |e: std::io::Error| CacheError::Io { path, source: e }
            };
            for entry in std::fs::read_dir(&dir).map_err(io_err(&dir))? {
                let path = entry.map_err(io_err(&dir))?.path();
                if live.contains(&path) {
                    continue;
                }
                if path.is_dir() {
                    std::fs::remove_dir_all(&path).map_err(io_err(&path))?;
                } else {
                    std::fs::remove_file(&path).map_err(io_err(&path))?;
                }
                tracing::debug!(path = %path.display(), "removed stale artifact");
                removed += 1;
            }
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(src: &[u8]) -> CompilationProfile {
        CompilationProfile::compute(src, "g++", &["-O2"], &[])
    }

    fn fake_build(cache: &CompileCache, stem: &str, p: &CompilationProfile) -> PathBuf {
        let path = cache.artifact_path(stem, p, ArtifactKind::Executable);
        cache.prepare(&path, ArtifactKind::Executable).unwrap();
        std::fs::write(&path, b"binary").unwrap();
        path
    }

    #[test]
    fn fresh_cache_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let cache = CompileCache::load_or_create(dir.path());
        assert_eq!(cache.entries().count(), 0);
    }

    #[test]
    fn record_then_lookup_hits() {
        let dir = tempfile::tempdir().unwrap();
        let mut cache = CompileCache::load_or_create(dir.path());
        let p = profile(b"src");
        let artifact = fake_build(&cache, "std", &p);
        cache.record(Path::new("std.cpp"), "g++", &p, &artifact).unwrap();

        assert_eq!(cache.lookup(Path::new("std.cpp"), "g++", &p), Some(artifact.clone()));

        // Survives a reload from disk.
        let reloaded = CompileCache::load_or_create(dir.path());
        assert_eq!(reloaded.lookup(Path::new("std.cpp"), "g++", &p), Some(artifact));
    }

    #[test]
    fn changed_fingerprint_misses() {
        let dir = tempfile::tempdir().unwrap();
        let mut cache = CompileCache::load_or_create(dir.path());
        let p = profile(b"src");
        let artifact = fake_build(&cache, "std", &p);
        cache.record(Path::new("std.cpp"), "g++", &p, &artifact).unwrap();

        assert!(cache.lookup(Path::new("std.cpp"), "g++", &profile(b"src2")).is_none());
    }

    #[test]
    fn other_compiler_misses() {
        let dir = tempfile::tempdir().unwrap();
        let mut cache = CompileCache::load_or_create(dir.path());
        let p = profile(b"src");
        let artifact = fake_build(&cache, "std", &p);
        cache.record(Path::new("std.cpp"), "g++", &p, &artifact).unwrap();

        assert!(cache.lookup(Path::new("std.cpp"), "clang++", &p).is_none());
    }

    #[test]
    fn deleted_artifact_misses() {
        let dir = tempfile::tempdir().unwrap();
        let mut cache = CompileCache::load_or_create(dir.path());
        let p = profile(b"src");
        let artifact = fake_build(&cache, "std", &p);
        cache.record(Path::new("std.cpp"), "g++", &p, &artifact).unwrap();
        std::fs::remove_file(&artifact).unwrap();

        assert!(cache.lookup(Path::new("std.cpp"), "g++", &p).is_none());
    }

    #[test]
    fn artifact_name_embeds_short_fingerprint() {
        let dir = tempfile::tempdir().unwrap();
        let cache = CompileCache::load_or_create(dir.path());
        let p = profile(b"src");
        let exe = cache.artifact_path("std", &p, ArtifactKind::Executable);
        let name = exe.file_name().unwrap().to_str().unwrap();
        assert_eq!(
            name,
            format!("std-{}{}", p.fingerprint.short(), std::env::consts::EXE_SUFFIX)
        );
        assert!(exe.starts_with(dir.path().join(BIN_SUBDIR)));

        let classes = cache.artifact_path("Main", &p, ArtifactKind::ClassDirectory);
        assert_eq!(
            classes,
            dir.path().join(CLASSES_SUBDIR).join(format!("Main-{}", p.fingerprint.short()))
        );
    }

    #[test]
    fn corrupt_manifest_is_empty_cache() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(crate::MANIFEST_FILE), "garbage").unwrap();
        let mut cache = CompileCache::load_or_create(dir.path());
        assert_eq!(cache.entries().count(), 0);

        // Writing over a corrupt manifest works.
        let p = profile(b"src");
        let artifact = fake_build(&cache, "std", &p);
        cache.record(Path::new("std.cpp"), "g++", &p, &artifact).unwrap();
        assert_eq!(CompileCache::load_or_create(dir.path()).entries().count(), 1);
    }

    #[test]
    fn record_overwrites_previous_entry() {
        let dir = tempfile::tempdir().unwrap();
        let mut cache = CompileCache::load_or_create(dir.path());
        let p1 = profile(b"v1");
        let a1 = fake_build(&cache, "std", &p1);
        cache.record(Path::new("std.cpp"), "g++", &p1, &a1).unwrap();
        let p2 = profile(b"v2");
        let a2 = fake_build(&cache, "std", &p2);
        cache.record(Path::new("std.cpp"), "g++", &p2, &a2).unwrap();

        assert_eq!(cache.entries().count(), 1);
        assert!(cache.lookup(Path::new("std.cpp"), "g++", &p1).is_none());
        assert_eq!(cache.lookup(Path::new("std.cpp"), "g++", &p2), Some(a2));
    }

    #[test]
    fn gc_removes_unreferenced_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let mut cache = CompileCache::load_or_create(dir.path());
        let p1 = profile(b"v1");
        let stale = fake_build(&cache, "std", &p1);
        cache.record(Path::new("std.cpp"), "g++", &p1, &stale).unwrap();
        let p2 = profile(b"v2");
        let live = fake_build(&cache, "std", &p2);
        cache.record(Path::new("std.cpp"), "g++", &p2, &live).unwrap();

        let classes = cache.artifact_path("Main", &p1, ArtifactKind::ClassDirectory);
        cache.prepare(&classes, ArtifactKind::ClassDirectory).unwrap();
        std::fs::write(classes.join("Main.class"), b"cafebabe").unwrap();

        assert_eq!(cache.gc().unwrap(), 2);
        assert!(!stale.exists());
        assert!(!classes.exists());
        assert!(live.exists());
    }

    #[test]
    fn gc_on_empty_cache_removes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let cache = CompileCache::load_or_create(dir.path());
        assert_eq!(cache.gc().unwrap(), 0);
    }

    #[test]
    fn clear_drops_entries() {
        let dir = tempfile::tempdir().unwrap();
        let mut cache = CompileCache::load_or_create(dir.path());
        let p = profile(b"src");
        let artifact = fake_build(&cache, "std", &p);
        cache.record(Path::new("std.cpp"), "g++", &p, &artifact).unwrap();
        cache.clear().unwrap();
        assert_eq!(CompileCache::load_or_create(dir.path()).entries().count(), 0);
    }
}
