//! `src/fs/source.rs`
//! ============================================================
//! The filesystem interface consumed by the scan worker and the navigator.
//!
//! Everything here is synchronous and blocking; callers run it on the
//! blocking pool. `LocalFileSystem` is the `std::fs` implementation.

use std::fmt::Debug;
use std::fs::{self, DirEntry, Metadata};
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use tracing::trace;

use crate::error::{NavError, NavResult};

/// One direct child of an enumerated directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildInfo {
    /// Resolved path (symlinks followed).
    pub path: PathBuf,
    pub is_dir: bool,
    pub modified: Option<SystemTime>,
}

/// Children in filesystem order. Each item may fail on its own.
pub type ChildIter = Box<dyn Iterator<Item = NavResult<ChildInfo>> + Send>;

/// Filesystem operations the navigation core depends on.
pub trait FileSystem: Send + Sync + Debug {
    /// Resolve to an absolute path with `.`, `..` and symlinks removed.
    fn resolve(&self, path: &Path) -> NavResult<PathBuf>;

    /// Lazily enumerate the direct children of `dir`.
    fn read_children(&self, dir: &Path) -> NavResult<ChildIter>;

    /// Best-effort modification time.
    fn modified(&self, path: &Path) -> Option<SystemTime>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileSystem;

impl LocalFileSystem {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn child_info(entry: io::Result<DirEntry>, dir: &Path) -> NavResult<ChildInfo> {
        let entry: DirEntry = entry.map_err(|e| NavError::metadata_unavailable(dir, e))?;
        let path: PathBuf = entry.path();

        // `fs::metadata` follows symlinks, so a link to a directory counts.
        let meta: Metadata =
            fs::metadata(&path).map_err(|e| NavError::metadata_unavailable(&path, e))?;

        let is_link = entry.file_type().is_ok_and(|t| t.is_symlink());
        let resolved: PathBuf = if is_link {
            fs::canonicalize(&path).map_err(|e| NavError::metadata_unavailable(&path, e))?
        } else {
            path
        };

        trace!(child = %resolved.display(), is_dir = meta.is_dir(), "read child");

        Ok(ChildInfo {
            path: resolved,
            is_dir: meta.is_dir(),
            modified: meta.modified().ok(),
        })
    }
}

impl FileSystem for LocalFileSystem {
    fn resolve(&self, path: &Path) -> NavResult<PathBuf> {
        fs::canonicalize(path).map_err(|e| NavError::resolution_failed(path, e))
    }

    fn read_children(&self, dir: &Path) -> NavResult<ChildIter> {
        let read_dir = fs::read_dir(dir).map_err(|e| NavError::enumeration_failed(dir, e))?;
        let dir: PathBuf = dir.to_path_buf();

        Ok(Box::new(
            read_dir.map(move |entry| Self::child_info(entry, &dir)),
        ))
    }

    fn modified(&self, path: &Path) -> Option<SystemTime> {
        fs::metadata(path).and_then(|m| m.modified()).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::ErrorKind;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_removes_dot_segments() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("sub")).unwrap();

        let local = LocalFileSystem::new();
        let resolved = local.resolve(&temp.path().join("sub").join("..")).unwrap();

        assert_eq!(resolved, local.resolve(temp.path()).unwrap());
    }

    #[test]
    fn test_resolve_missing_path_fails() {
        let temp = TempDir::new().unwrap();
        let err = LocalFileSystem::new()
            .resolve(&temp.path().join("missing"))
            .unwrap_err();

        assert!(matches!(err, NavError::ResolutionFailed { .. }));
        assert_eq!(err.io_kind(), Some(ErrorKind::NotFound));
    }

    #[test]
    fn test_read_children_reports_kind() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("dir")).unwrap();
        fs::write(temp.path().join("file.txt"), b"x").unwrap();

        let mut children: Vec<ChildInfo> = LocalFileSystem::new()
            .read_children(temp.path())
            .unwrap()
            .map(Result::unwrap)
            .collect();
        children.sort_by(|a, b| a.path.cmp(&b.path));

        assert_eq!(children.len(), 2);
        assert!(children[0].is_dir);
        assert!(!children[1].is_dir);
        assert!(children[0].modified.is_some());
    }

    #[test]
    fn test_read_children_of_missing_dir_fails() {
        let temp = TempDir::new().unwrap();
        let err = LocalFileSystem::new()
            .read_children(&temp.path().join("nope"))
            .err()
            .unwrap();

        assert!(matches!(err, NavError::EnumerationFailed { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_directory_is_resolved() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("target");
        fs::create_dir(&target).unwrap();
        std::os::unix::fs::symlink(&target, temp.path().join("link")).unwrap();

        let local = LocalFileSystem::new();
        let canonical_target = local.resolve(&target).unwrap();
        let root = local.resolve(temp.path()).unwrap();
        let children: Vec<ChildInfo> = local
            .read_children(&root)
            .unwrap()
            .map(Result::unwrap)
            .collect();

        assert_eq!(children.len(), 2);
        assert!(children.iter().all(|c| c.is_dir));
        assert!(children.iter().all(|c| c.path == canonical_target));
    }

    #[cfg(unix)]
    #[test]
    fn test_dangling_symlink_is_a_per_entry_error() {
        let temp = TempDir::new().unwrap();
        std::os::unix::fs::symlink(temp.path().join("nowhere"), temp.path().join("dangling"))
            .unwrap();

        let results: Vec<NavResult<ChildInfo>> = LocalFileSystem::new()
            .read_children(temp.path())
            .unwrap()
            .collect();

        assert_eq!(results.len(), 1);
        assert!(matches!(
            results[0],
            Err(NavError::EntryMetadataUnavailable { .. })
        ));
    }
}
