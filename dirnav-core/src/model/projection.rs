//! ``src/model/projection.rs``
//! ============================================================================
//! # Display Projection
//!
//! `EntryCache` is the unfiltered result of the last completed scan; `project`
//! derives the rows to show from it plus the display flags. No I/O happens
//! here: the parent row is built by the scan worker and carried in the cache.

use std::path::Path;
use std::sync::Arc;

use crate::fs::entry::DirectoryEntry;
use crate::util::paths::is_hidden;

/// Display policy flags. Changing them never touches the filesystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayOptions {
    pub show_hidden: bool,
    pub sort_enabled: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            show_hidden: false,
            sort_enabled: true,
        }
    }
}

/// Subdirectories of one location as of a completed scan.
///
/// Replaced wholesale on the next completed scan, never patched.
#[derive(Debug, Clone, Default)]
pub struct EntryCache {
    location: Option<Arc<Path>>,
    parent: Option<DirectoryEntry>,
    entries: Arc<Vec<DirectoryEntry>>,
}

impl EntryCache {
    #[must_use]
    pub fn new(
        location: &Path,
        parent: Option<DirectoryEntry>,
        entries: Vec<DirectoryEntry>,
    ) -> Self {
        Self {
            location: Some(Arc::from(location)),
            parent,
            entries: Arc::new(entries),
        }
    }

    /// Location the entries belong to; `None` before the first scan lands.
    #[must_use]
    pub fn location(&self) -> Option<&Path> {
        self.location.as_deref()
    }

    #[must_use]
    pub const fn parent(&self) -> Option<&DirectoryEntry> {
        self.parent.as_ref()
    }

    /// Entries in discovery order.
    #[must_use]
    pub fn entries(&self) -> &[DirectoryEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Derive the displayed rows: parent row first (never filtered or sorted),
/// then visible entries, name-sorted when sorting is enabled.
#[must_use]
pub fn project(cache: &EntryCache, options: DisplayOptions) -> Vec<DirectoryEntry> {
    let mut visible: Vec<DirectoryEntry> = cache
        .entries()
        .iter()
        .filter(|entry| options.show_hidden || !is_hidden(entry.name()))
        .cloned()
        .collect();

    if options.sort_enabled {
        // Stable, byte-wise (case-sensitive) comparison.
        visible.sort_by(|a, b| a.name().cmp(b.name()));
    }

    let mut rows: Vec<DirectoryEntry> = Vec::with_capacity(visible.len() + 1);
    rows.extend(cache.parent().cloned());
    rows.append(&mut visible);
    rows
}
