//! On-disk map from `(source, compiler)` keys to built artifacts.
//!
//! Stored as `cache.json` in the cache directory: a single JSON object whose
//! keys are `"<sourceFile>-<compilerCommand>"` and whose values are
//! `{"hash": "<hex>", "executablePath": "<path>"}`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use duet_common::Fingerprint;
use serde::{Deserialize, Serialize};

use crate::error::CacheError;

/// Name of the manifest file within the cache directory.
pub const MANIFEST_FILE: &str = "cache.json";

/// Builds the manifest key for a source file compiled with `compiler`.
pub fn cache_key(source: &Path, compiler: &str) -> String {
    format!("{}-{compiler}", source.display())
}

/// One remembered compile result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Fingerprint of the inputs that produced the artifact.
    pub hash: Fingerprint,

    /// The binary, or for class-directory languages the class directory.
    #[serde(rename = "executablePath")]
    pub executable_path: PathBuf,
}

/// The full cache map, ordered by key so saved files diff cleanly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CacheManifest {
    /// Entries keyed by [`cache_key`].
    pub entries: BTreeMap<String, CacheEntry>,
}

impl CacheManifest {
    /// Creates an empty manifest.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the manifest from the cache directory, returning `None` if the
    /// file doesn't exist or can't be parsed.
    pub fn load(cache_dir: &Path) -> Option<Self> {
        let path = cache_dir.join(MANIFEST_FILE);
        let content = std::fs::read_to_string(&path).ok()?;
        match serde_json::from_str(&content) {
            Ok(manifest) => Some(manifest),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring corrupt cache manifest");
                None
            }
        }
    }

    /// Loads the manifest, treating a missing or corrupt file as empty.
    pub fn load_or_default(cache_dir: &Path) -> Self {
        Self::load(cache_dir).unwrap_or_default()
    }

    /// Saves the manifest to the cache directory.
    ///
    /// Writes to a sibling temporary file first and renames it over the
    /// manifest, so readers never observe a half-written file.
    pub fn save(&self, cache_dir: &Path) -> Result<(), CacheError> {
        std::fs::create_dir_all(cache_dir).map_err(|e| CacheError::Io {
            path: cache_dir.to_path_buf(),
            source: e,
        })?;
        let json = serde_json::to_string_pretty(self).map_err(|e| CacheError::Serialization {
            reason: e.to_string(),
        })?;
        let path = cache_dir.join(MANIFEST_FILE);
        let tmp = cache_dir.join(format!("{MANIFEST_FILE}.tmp"));
        std::fs::write(&tmp, json).map_err(|e| CacheError::Io {
            path: tmp.clone(),
            source: e,
        })?;
        std::fs::rename(&tmp, &path).map_err(|e| CacheError::Io { path, source: e })
    }

    /// Returns the entry for `key`, if any.
    pub fn get(&self, key: &str) -> Option<&CacheEntry> {
        self.entries.get(key)
    }

    /// Inserts or overwrites the entry for `key`.
    pub fn insert(&mut self, key: String, entry: CacheEntry) {
        self.entries.insert(key, entry);
    }
}
