//! Compilation cache keyed by source, toolchain, and flag fingerprints.
//!
//! This crate remembers which built artifact belongs to which
//! `(source file, compiler)` pair and under which [`Fingerprint`]. A lookup
//! only hits when the freshly computed fingerprint matches the stored one and
//! the artifact still exists on disk, so edited sources, switched compilers,
//! and changed flags always rebuild.
//!
//! The manifest is a plain JSON object in a hidden directory of the project.
//! Only one writer per manifest is supported; concurrent processes sharing a
//! cache directory may lose each other's entries.
//!
//! [`Fingerprint`]: duet_common::Fingerprint

#![warn(missing_docs)]

pub mod cache;
pub mod error;
pub mod manifest;
pub mod profile;

pub use cache::{ArtifactKind, CompileCache, BIN_SUBDIR, CLASSES_SUBDIR, DEFAULT_CACHE_DIR};
pub use error::CacheError;
pub use manifest::{cache_key, CacheEntry, CacheManifest, MANIFEST_FILE};
pub use profile::CompilationProfile;
