//! ``src/tasks/scan_task.rs``
//! ============================================================================
//! # Scan Task: cancellable listing of a directory's subdirectories
//!
//! Runs on the blocking pool, checks its `CancellationToken` at every child
//! boundary and sends exactly one `ScanReport` back to the owning navigator.
//! Per-entry metadata failures are skipped; only a failure to open the
//! directory fails the scan.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::mpsc::UnboundedSender;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, info_span, trace};

use crate::error::NavError;
use crate::fs::entry::DirectoryEntry;
use crate::fs::source::{ChildInfo, FileSystem};
use crate::model::projection::EntryCache;
use crate::util::paths::is_root;

/// One scan to run: where, which generation, and how to stop it.
#[derive(Debug, Clone)]
pub struct ScanRequest {
    pub scan_id: String,
    pub generation: u64,
    pub location: PathBuf,
    pub cancel_token: CancellationToken,
}

impl ScanRequest {
    #[must_use]
    pub fn new(generation: u64, location: PathBuf, cancel_token: CancellationToken) -> Self {
        Self {
            scan_id: nanoid::nanoid!(),
            generation,
            location,
            cancel_token,
        }
    }
}

/// Terminal outcome of a scan.
#[derive(Debug, Clone)]
pub enum ScanResult {
    /// Stopped by its token; nothing may be applied.
    Cancelled,

    /// Every readable subdirectory, in discovery order.
    Completed(EntryCache),

    /// The directory itself could not be listed.
    Failed(NavError),
}

impl ScanResult {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Cancelled => "cancelled",
            Self::Completed(_) => "completed",
            Self::Failed(_) => "failed",
        }
    }
}

/// Message handed back to the navigator's thread once per scan.
#[derive(Debug, Clone)]
pub struct ScanReport {
    pub generation: u64,
    pub location: PathBuf,
    pub result: ScanResult,
    pub exec: Duration,
}

/// Enumerate `location` synchronously, honouring `cancel_token`.
pub fn scan_directory(
    fs: &dyn FileSystem,
    location: &Path,
    cancel_token: &CancellationToken,
) -> ScanResult {
    if cancel_token.is_cancelled() {
        return ScanResult::Cancelled;
    }

    let children = match fs.read_children(location) {
        Ok(children) => children,
        Err(e) => return ScanResult::Failed(e),
    };

    let mut entries: Vec<DirectoryEntry> = Vec::new();
    let mut skipped: usize = 0;

    for child in children {
        if cancel_token.is_cancelled() {
            debug!(location = %location.display(), seen = entries.len(), "scan cancelled mid-listing");
            return ScanResult::Cancelled;
        }

        match child {
            Ok(ChildInfo {
                path,
                is_dir: true,
                modified,
            }) => entries.push(DirectoryEntry::new(path, modified)),

            Ok(_) => {}

            Err(e) => {
                skipped += 1;
                trace!("skipping entry: {e}");
            }
        }
    }

    if cancel_token.is_cancelled() {
        return ScanResult::Cancelled;
    }

    if skipped > 0 {
        debug!(location = %location.display(), skipped, "entries without readable metadata were skipped");
    }

    let parent: Option<DirectoryEntry> = if is_root(location) {
        None
    } else {
        location
            .parent()
            .map(|p| DirectoryEntry::parent_row(p.to_path_buf(), fs.modified(p)))
    };

    ScanResult::Completed(EntryCache::new(location, parent, entries))
}

/// Run `request` on the blocking pool and report back through `report_tx`.
///
/// Outside a Tokio runtime there is no blocking pool; the scan then runs on
/// the caller's thread, the report is queued before this returns and no
/// handle is given back.
pub fn spawn_scan(
    fs: Arc<dyn FileSystem>,
    request: ScanRequest,
    report_tx: UnboundedSender<ScanReport>,
) -> Option<JoinHandle<()>> {
    match Handle::try_current() {
        Ok(handle) => Some(handle.spawn_blocking(move || run_scan(fs.as_ref(), request, &report_tx))),
        Err(_) => {
            debug!("no Tokio runtime, scanning on the calling thread");
            run_scan(fs.as_ref(), request, &report_tx);
            None
        }
    }
}

fn run_scan(fs: &dyn FileSystem, request: ScanRequest, report_tx: &UnboundedSender<ScanReport>) {
    let span = info_span!(
        "directory_scan",
        scan_id = %request.scan_id,
        generation = request.generation,
        location = %request.location.display()
    );
    let _enter = span.enter();
    let start = Instant::now();

    let result = scan_directory(fs, &request.location, &request.cancel_token);
    let exec = start.elapsed();

    match &result {
        ScanResult::Completed(cache) => {
            info!(entries = cache.len(), ?exec, "scan completed");
        }
        other => debug!(outcome = other.name(), ?exec, "scan finished"),
    }

    let report = ScanReport {
        generation: request.generation,
        location: request.location,
        result,
        exec,
    };

    if report_tx.send(report).is_err() {
        trace!("navigator gone before scan report was delivered");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::mock::MockFileSystem;
    use crate::fs::source::LocalFileSystem;
    use std::io::ErrorKind;
    use tempfile::TempDir;
    use tokio::sync::mpsc;

    fn names(cache: &EntryCache) -> Vec<&str> {
        cache.entries().iter().map(DirectoryEntry::name).collect()
    }

    #[test]
    fn test_only_directories_in_discovery_order() {
        let fs = MockFileSystem::new()
            .with_dir("/a", &[".git", "src", "docs"])
            .with_file("/a", "README.md");

        let result = scan_directory(&fs, Path::new("/a"), &CancellationToken::new());

        let ScanResult::Completed(cache) = result else {
            panic!("expected completed scan");
        };
        assert_eq!(names(&cache), [".git", "src", "docs"]);
        assert_eq!(cache.location(), Some(Path::new("/a")));
        assert_eq!(cache.parent().map(DirectoryEntry::path), Some(Path::new("/")));
    }

    #[test]
    fn test_broken_entry_is_skipped() {
        let fs = MockFileSystem::new()
            .with_dir("/a", &["one"])
            .with_broken("/a", "bad")
            .with_dir("/a", &["two"]);

        let ScanResult::Completed(cache) =
            scan_directory(&fs, Path::new("/a"), &CancellationToken::new())
        else {
            panic!("expected completed scan");
        };
        assert_eq!(names(&cache), ["one", "two"]);
    }

    #[test]
    fn test_missing_directory_fails() {
        let fs = MockFileSystem::new();
        let result = scan_directory(&fs, Path::new("/missing"), &CancellationToken::new());

        let ScanResult::Failed(err) = result else {
            panic!("expected failure");
        };
        assert!(matches!(err, NavError::EnumerationFailed { .. }));
        assert_eq!(err.io_kind(), Some(ErrorKind::NotFound));
    }

    #[test]
    fn test_pre_cancelled_scan_never_reads() {
        let fs = MockFileSystem::new().with_dir("/a", &["x"]);
        let token = CancellationToken::new();
        token.cancel();

        let result = scan_directory(&fs, Path::new("/a"), &token);

        assert!(matches!(result, ScanResult::Cancelled));
        assert_eq!(fs.reads(), 0);
    }

    #[test]
    fn test_root_has_no_parent_row() {
        let fs = MockFileSystem::new().with_dir("/a", &[]);
        let ScanResult::Completed(cache) =
            scan_directory(&fs, Path::new("/"), &CancellationToken::new())
        else {
            panic!("expected completed scan");
        };
        assert!(cache.parent().is_none());
        assert_eq!(names(&cache), ["a"]);
    }

    #[tokio::test]
    async fn test_cancel_while_blocked_reports_cancelled() {
        let fs = Arc::new(MockFileSystem::new().with_dir("/a", &["x", "y"]));
        let gate = fs.gate("/a");
        let (tx, mut rx) = mpsc::unbounded_channel();
        let token = CancellationToken::new();

        let request = ScanRequest::new(7, PathBuf::from("/a"), token.clone());
        let handle = spawn_scan(fs.clone(), request, tx);

        token.cancel();
        drop(gate);

        let report = rx.recv().await.unwrap();
        handle.unwrap().await.unwrap();

        assert_eq!(report.generation, 7);
        assert!(matches!(report.result, ScanResult::Cancelled));
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_real_directory_scan() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join("sub")).unwrap();
        std::fs::create_dir(temp.path().join(".hidden")).unwrap();
        std::fs::write(temp.path().join("file.txt"), b"x").unwrap();

        let local: Arc<dyn FileSystem> = Arc::new(LocalFileSystem::new());
        let location = local.resolve(temp.path()).unwrap();
        let (tx, mut rx) = mpsc::unbounded_channel();

        spawn_scan(
            local,
            ScanRequest::new(1, location.clone(), CancellationToken::new()),
            tx,
        );

        let report = rx.recv().await.unwrap();
        assert_eq!(report.location, location);

        let ScanResult::Completed(cache) = report.result else {
            panic!("expected completed scan");
        };
        let mut found = names(&cache);
        found.sort_unstable();
        assert_eq!(found, [".hidden", "sub"]);
    }

    #[test]
    fn test_without_runtime_scans_inline() {
        let fs = Arc::new(MockFileSystem::new().with_dir("/a", &["x"]));
        let (tx, mut rx) = mpsc::unbounded_channel();

        let handle = spawn_scan(fs, ScanRequest::new(3, PathBuf::from("/a"), CancellationToken::new()), tx);
        assert!(handle.is_none());

        let report = rx.try_recv().unwrap();
        assert_eq!(report.generation, 3);
        let ScanResult::Completed(cache) = report.result else {
            panic!("expected completed scan");
        };
        assert_eq!(names(&cache), ["x"]);
    }
}
