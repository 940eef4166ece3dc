//! `src/fs/entry.rs`
//! ============================================================
//! `DirectoryEntry`: one navigable subdirectory.
//!
//! The path is resolved before construction; name and the formatted
//! modification time are computed once and never change. Equality and
//! hashing look at the path only.

use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{DateTime, Local, TimeZone};
use compact_str::CompactString;

use crate::util::paths::display_name;

/// Timestamp layout used for the label (whole seconds, space separated).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Label shown for the synthetic parent row.
pub const PARENT_LABEL: &str = "..";

#[derive(Debug, Clone)]
pub struct DirectoryEntry {
    // Shared resolved path - identity
    path: Arc<PathBuf>,

    // Final component - rendering and sorting
    name: CompactString,

    // Formatted once at construction, empty when unknown
    modified: CompactString,

    // Synthetic ".." row
    is_parent: bool,
}

impl DirectoryEntry {
    /// Build from an already resolved path and its modification time.
    #[must_use]
    pub fn new(path: PathBuf, modified: Option<SystemTime>) -> Self {
        let name = CompactString::new(display_name(&path));
        let modified = modified.map(format_mtime).unwrap_or_default();

        Self {
            path: Arc::new(path),
            name,
            modified,
            is_parent: false,
        }
    }

    /// The synthetic row pointing at `parent`.
    #[must_use]
    pub fn parent_row(parent: PathBuf, modified: Option<SystemTime>) -> Self {
        Self {
            is_parent: true,
            ..Self::new(parent, modified)
        }
    }

    #[inline]
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Formatted modification time, empty if the time was unavailable.
    #[inline]
    #[must_use]
    pub fn modified(&self) -> &str {
        &self.modified
    }

    #[inline]
    #[must_use]
    pub const fn is_parent(&self) -> bool {
        self.is_parent
    }

    /// Text shown in the name column: `..` for the parent row.
    #[must_use]
    pub fn label(&self) -> &str {
        if self.is_parent { PARENT_LABEL } else { &self.name }
    }
}

impl PartialEq for DirectoryEntry {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Eq for DirectoryEntry {}

impl Hash for DirectoryEntry {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.path.hash(state);
    }
}

/// Truncate to whole seconds and format in local time.
#[expect(clippy::cast_possible_wrap, reason = "Expected")]
fn format_mtime(time: SystemTime) -> CompactString {
    let secs = time
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_secs());

    Local
        .timestamp_opt(secs as i64, 0)
        .single()
        .map(|dt: DateTime<Local>| CompactString::new(dt.format(TIMESTAMP_FORMAT).to_string()))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::time::Duration;

    #[test]
    fn test_equality_is_by_path() {
        let a = DirectoryEntry::new(PathBuf::from("/a/src"), None);
        let b = DirectoryEntry::new(
            PathBuf::from("/a/src"),
            Some(UNIX_EPOCH + Duration::from_secs(100)),
        );
        let c = DirectoryEntry::new(PathBuf::from("/a/docs"), None);

        assert_eq!(a, b);
        assert_ne!(a, c);

        let set: HashSet<_> = [a, b, c].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_name_and_label() {
        let entry = DirectoryEntry::new(PathBuf::from("/a/docs"), None);
        assert_eq!(entry.name(), "docs");
        assert_eq!(entry.label(), "docs");
        assert!(entry.modified().is_empty());

        let parent = DirectoryEntry::parent_row(PathBuf::from("/a"), None);
        assert!(parent.is_parent());
        assert_eq!(parent.name(), "a");
        assert_eq!(parent.label(), "..");
    }

    #[test]
    fn test_modified_is_truncated_to_seconds() {
        let base = UNIX_EPOCH + Duration::from_secs(1_700_000_000);
        let a = DirectoryEntry::new(PathBuf::from("/x"), Some(base));
        let b = DirectoryEntry::new(PathBuf::from("/x"), Some(base + Duration::from_millis(999)));

        assert_eq!(a.modified(), b.modified());
        assert_eq!(a.modified().len(), "2023-11-14 22:13:20".len());
    }
}
