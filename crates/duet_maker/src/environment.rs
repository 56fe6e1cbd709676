//! Safety-checked cleanup of the output directory.

use std::path::{Component, Path, PathBuf};

use duet_common::normalize_lexically;

use crate::error::MakerError;

/// Directory names that are never wiped, wherever they appear.
pub const FORBIDDEN_OUTPUT_NAMES: &[&str] = &["src", "node_modules", ".git", ".duet"];

/// Checks `output_dir` against `root`, then removes and recreates it.
///
/// Refuses, before touching the filesystem, when the directory's name is
/// protected or is `.`/`..`/empty/a root, when it resolves to `root` itself,
/// or when it resolves outside `root`. Returns the resolved absolute path.
pub fn prepare_environment(root: &Path, output_dir: &Path) -> Result<PathBuf, MakerError> {
    let refuse = |reason: &'static str| MakerError::UnsafeOutputDir {
        path: output_dir.to_path_buf(),
        reason,
    };

    check_name(output_dir).map_err(refuse)?;

    let root = absolute(root)?;
    let resolved = normalize_lexically(&root.join(output_dir));
    check_name(&resolved).map_err(refuse)?;
    if resolved == root {
        return Err(refuse("resolves to the project root"));
    }
    if !resolved.starts_with(&root) {
        return Err(refuse("resolves outside the project root"));
    }

    if resolved.exists() {
        tracing::debug!(path = %resolved.display(), "removing previous output");
        std::fs::remove_dir_all(&resolved).map_err(|e| MakerError::Io {
            path: resolved.clone(),
            source: e,
        })?;
    }
    std::fs::create_dir_all(&resolved).map_err(|e| MakerError::Io {
        path: resolved.clone(),
        source: e,
    })?;
    Ok(resolved)
}

fn check_name(path: &Path) -> Result<(), &'static str> {
    match path.components().next_back() {
        None | Some(Component::RootDir | Component::Prefix(_)) => {
            Err("empty or root path")
        }
        Some(Component::CurDir | Component::ParentDir) => Err("'.' and '..' are not allowed"),
        Some(Component::Normal(name)) => {
            if FORBIDDEN_OUTPUT_NAMES.iter().any(|f| name == *f) {
                Err("protected directory name")
            } else {
                Ok(())
            }
        }
    }
}

fn absolute(root: &Path) -> Result<PathBuf, MakerError> {
    let joined = if root.is_absolute() {
        root.to_path_buf()
    } else {
        std::env::current_dir()
            .map_err(|e| MakerError::Io {
                path: root.to_path_buf(),
                source: e,
            })?
            .join(root)
    };
    Ok(normalize_lexically(&joined))
}
