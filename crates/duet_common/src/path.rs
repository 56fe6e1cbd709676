//! Path helpers that do not touch the filesystem.

use std::path::{Component, Path, PathBuf};

/// Resolves `.` and `..` components of `path` without consulting the disk.
///
/// Unlike `std::fs::canonicalize`, this works for paths that do not exist
/// yet. A `..` that would climb above the root is dropped.
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let popped = match out.components().next_back() {
                    Some(Component::Normal(_)) => out.pop(),
                    Some(Component::RootDir) | Some(Component::Prefix(_)) => true,
                    _ => false,
                };
                if !popped {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_cur_dir() {
        assert_eq!(
            normalize_lexically(Path::new("/a/./b/.")),
            PathBuf::from("/a/b")
        );
    }

    #[test]
    fn resolves_parent_dir() {
        assert_eq!(
            normalize_lexically(Path::new("/a/b/../c")),
            PathBuf::from("/a/c")
        );
    }

    #[test]
    fn parent_above_root_is_dropped() {
        assert_eq!(normalize_lexically(Path::new("/../x")), PathBuf::from("/x"));
    }

    #[test]
    fn relative_leading_parent_is_kept() {
        assert_eq!(
            normalize_lexically(Path::new("../x/y/..")),
            PathBuf::from("../x")
        );
    }
}
