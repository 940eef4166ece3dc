//! ``src/model/navigation.rs``
//! ============================================================================
//! # Navigator: location state machine for one directory view
//!
//! Owns the current location, the last completed listing, the display flags
//! and the highlighted row. Location changes start a background scan; only
//! the report of the newest scan is ever applied. Flag changes re-project the
//! cached listing without touching the filesystem.
//!
//! All methods run on the owner's single logical thread. Scan workers hand
//! their results back through the `ScanReport` channel returned by
//! [`Navigator::new`]; the owner feeds each report to
//! [`Navigator::apply_scan_report`].

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, trace, warn};

use crate::controller::events::NavigationEvent;
use crate::error::NavResult;
use crate::fs::entry::DirectoryEntry;
use crate::fs::source::FileSystem;
use crate::model::projection::{DisplayOptions, EntryCache, project};
use crate::tasks::scan_task::{ScanReport, ScanRequest, ScanResult, spawn_scan};
use crate::util::paths::{expand_home, is_root};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    Idle,
    Scanning,
}

#[derive(Debug)]
struct InFlightScan {
    generation: u64,
    location: PathBuf,
    cancel_token: CancellationToken,
}

#[derive(Debug)]
pub struct Navigator {
    fs: Arc<dyn FileSystem>,

    /// Resolved, absolute.
    location: PathBuf,

    cache: EntryCache,
    options: DisplayOptions,

    /// `project(cache, options)`, kept in sync on every change.
    rows: Vec<DirectoryEntry>,
    highlighted: Option<usize>,

    in_flight: Option<InFlightScan>,
    generation: u64,
    scans_started: u64,

    report_tx: UnboundedSender<ScanReport>,
    events_tx: UnboundedSender<NavigationEvent>,

    // Row to highlight once the pending listing lands (child we came up from)
    pending_highlight: Option<PathBuf>,
}

impl Navigator {
    /// Resolve `start` (with `~` expanded) and build an idle navigator.
    ///
    /// Nothing is scanned until [`Navigator::mount`] is called.
    pub fn new(
        fs: Arc<dyn FileSystem>,
        start: impl AsRef<Path>,
        options: DisplayOptions,
        events_tx: UnboundedSender<NavigationEvent>,
    ) -> NavResult<(Self, UnboundedReceiver<ScanReport>)> {
        let location: PathBuf = fs.resolve(&expand_home(start.as_ref()))?;
        let (report_tx, report_rx) = mpsc::unbounded_channel();

        let navigator = Self {
            fs,
            location,
            cache: EntryCache::default(),
            options,
            rows: Vec::new(),
            highlighted: None,
            in_flight: None,
            generation: 0,
            scans_started: 0,
            report_tx,
            events_tx,
            pending_highlight: None,
        };

        Ok((navigator, report_rx))
    }

    /// First load: announce the starting location and scan it.
    ///
    /// Scans run on Tokio's blocking pool; without a runtime they run inline
    /// and the report is already queued when this returns.
    #[instrument(level = "debug", skip(self), fields(location = %self.location.display()))]
    pub fn mount(&mut self) {
        self.emit(NavigationEvent::LocationChanged(self.location.clone()));
        self.start_scan();
    }

    #[must_use]
    pub fn location(&self) -> &Path {
        &self.location
    }

    #[must_use]
    pub const fn state(&self) -> ScanState {
        if self.in_flight.is_some() {
            ScanState::Scanning
        } else {
            ScanState::Idle
        }
    }

    #[must_use]
    pub const fn options(&self) -> DisplayOptions {
        self.options
    }

    /// Last completed listing, unfiltered.
    #[must_use]
    pub const fn cache(&self) -> &EntryCache {
        &self.cache
    }

    /// Rows to display, parent row first.
    #[must_use]
    pub fn rows(&self) -> &[DirectoryEntry] {
        &self.rows
    }

    /// Number of scans started over the navigator's lifetime.
    #[must_use]
    pub const fn scans_started(&self) -> u64 {
        self.scans_started
    }

    /// Move to `path`. `~` is expanded and the result resolved first.
    ///
    /// Returns `Ok(false)` when `path` resolves to the current location.
    /// A resolution failure is emitted as [`NavigationEvent::Failed`],
    /// returned, and leaves every piece of state untouched.
    #[instrument(level = "debug", skip(self, path), fields(requested = %path.as_ref().display()))]
    pub fn set_location(&mut self, path: impl AsRef<Path>) -> NavResult<bool> {
        let expanded: PathBuf = expand_home(path.as_ref());

        let resolved: PathBuf = match self.fs.resolve(&expanded) {
            Ok(resolved) => resolved,
            Err(e) => {
                warn!("location change rejected: {e}");
                self.emit(NavigationEvent::Failed(e.clone()));
                return Err(e);
            }
        };

        Ok(self.change_location(resolved))
    }

    /// Navigate into `entry` (a row of [`Navigator::rows`]).
    ///
    /// Entry paths are already resolved, so no resolution happens here; a
    /// directory that vanished since the listing surfaces as a failed scan.
    pub fn select(&mut self, entry: &DirectoryEntry) -> bool {
        self.change_location(entry.path().to_path_buf())
    }

    /// Move to the parent of the current location; no-op at a root.
    pub fn go_to_parent(&mut self) -> bool {
        if is_root(&self.location) {
            trace!("already at root");
            return false;
        }

        match self.location.parent() {
            Some(parent) => {
                let parent = parent.to_path_buf();
                self.change_location(parent)
            }
            None => false,
        }
    }

    pub fn toggle_hidden(&mut self) {
        self.set_show_hidden(!self.options.show_hidden);
    }

    pub fn set_show_hidden(&mut self, show_hidden: bool) {
        if self.options.show_hidden == show_hidden {
            return;
        }

        self.options.show_hidden = show_hidden;
        debug!(show_hidden, "hidden entries toggled");
        self.reproject(None);
        self.emit(NavigationEvent::DisplayUpdated);
    }

    pub fn toggle_sort(&mut self) {
        self.set_sort_enabled(!self.options.sort_enabled);
    }

    pub fn set_sort_enabled(&mut self, sort_enabled: bool) {
        if self.options.sort_enabled == sort_enabled {
            return;
        }

        self.options.sort_enabled = sort_enabled;
        debug!(sort_enabled, "sorting toggled");
        self.reproject(None);
        self.emit(NavigationEvent::DisplayUpdated);
    }

    /// Rescan the current location, replacing any in-flight scan.
    pub fn refresh(&mut self) {
        self.start_scan();
    }

    /// Cancel the in-flight scan, if any, and return to `Idle`.
    pub fn cancel_scan(&mut self) {
        if let Some(scan) = self.in_flight.take() {
            debug!(
                generation = scan.generation,
                location = %scan.location.display(),
                "cancelling scan"
            );
            scan.cancel_token.cancel();
        }
    }

    /// Apply a report from the scan channel.
    ///
    /// Reports from any scan other than the newest one are discarded.
    /// Returns whether the report was applied.
    #[instrument(level = "debug", skip_all, fields(generation = report.generation, outcome = report.result.name()))]
    pub fn apply_scan_report(&mut self, report: ScanReport) -> bool {
        let is_current = self
            .in_flight
            .as_ref()
            .is_some_and(|scan| scan.generation == report.generation);

        if !is_current {
            trace!(location = %report.location.display(), "discarding stale scan report");
            return false;
        }

        self.in_flight = None;

        match report.result {
            ScanResult::Completed(cache) => {
                let same_location = self.cache.location() == Some(report.location.as_path());
                let anchor: Option<PathBuf> = self.pending_highlight.take();

                self.cache = cache;

                // A new location never inherits the old highlight.
                if !same_location {
                    self.highlighted = None;
                }
                self.reproject(anchor);

                info!(
                    location = %report.location.display(),
                    rows = self.rows.len(),
                    exec = ?report.exec,
                    "listing applied"
                );
                self.emit(NavigationEvent::DisplayUpdated);
                true
            }

            ScanResult::Failed(e) => {
                warn!(location = %report.location.display(), "scan failed: {e}");
                self.pending_highlight = None;
                self.emit(NavigationEvent::Failed(e));
                true
            }

            // The token was cancelled without the scan being replaced.
            ScanResult::Cancelled => false,
        }
    }

    #[must_use]
    pub const fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    #[must_use]
    pub fn highlighted_entry(&self) -> Option<&DirectoryEntry> {
        self.highlighted.and_then(|idx| self.rows.get(idx))
    }

    /// Highlight `index`; out-of-range indices are ignored.
    pub fn set_highlight(&mut self, index: usize) {
        if index < self.rows.len() {
            self.highlighted = Some(index);
        }
    }

    pub fn highlight_next(&mut self) {
        if let Some(idx) = self.highlighted
            && idx + 1 < self.rows.len()
        {
            self.highlighted = Some(idx + 1);
        }
    }

    pub fn highlight_previous(&mut self) {
        if let Some(idx) = self.highlighted
            && idx > 0
        {
            self.highlighted = Some(idx - 1);
        }
    }

    pub fn highlight_first(&mut self) {
        if !self.rows.is_empty() {
            self.highlighted = Some(0);
        }
    }

    pub fn highlight_last(&mut self) {
        if !self.rows.is_empty() {
            self.highlighted = Some(self.rows.len() - 1);
        }
    }

    /// Select the highlighted row.
    pub fn activate_highlighted(&mut self) -> bool {
        match self.highlighted_entry().cloned() {
            Some(entry) => self.select(&entry),
            None => false,
        }
    }

    fn change_location(&mut self, new_location: PathBuf) -> bool {
        if new_location == self.location {
            trace!(location = %new_location.display(), "location unchanged");
            return false;
        }

        let old_location = std::mem::replace(&mut self.location, new_location);

        self.pending_highlight =
            (old_location.parent() == Some(self.location.as_path())).then_some(old_location);

        debug!(location = %self.location.display(), "location changed");
        self.emit(NavigationEvent::LocationChanged(self.location.clone()));
        self.start_scan();
        true
    }

    fn start_scan(&mut self) {
        self.cancel_scan();

        self.generation += 1;
        self.scans_started += 1;

        let cancel_token = CancellationToken::new();
        let request = ScanRequest::new(self.generation, self.location.clone(), cancel_token.clone());

        debug!(
            scan_id = %request.scan_id,
            generation = self.generation,
            location = %self.location.display(),
            "starting scan"
        );

        self.in_flight = Some(InFlightScan {
            generation: self.generation,
            location: self.location.clone(),
            cancel_token,
        });

        // Detached: the report channel is the only way back.
        drop(spawn_scan(Arc::clone(&self.fs), request, self.report_tx.clone()));
    }

    /// Recompute rows and settle the highlight.
    ///
    /// The highlight follows `anchor` when given, otherwise the entry that
    /// was highlighted before; if that row is gone it settles to 0.
    fn reproject(&mut self, anchor: Option<PathBuf>) {
        let anchor: Option<PathBuf> =
            anchor.or_else(|| self.highlighted_entry().map(|e| e.path().to_path_buf()));

        self.rows = project(&self.cache, self.options);

        self.highlighted = if self.rows.is_empty() {
            None
        } else {
            let kept = anchor.and_then(|path| {
                self.rows
                    .iter()
                    .position(|row| !row.is_parent() && row.path() == path)
            });
            Some(kept.unwrap_or(0))
        };
    }

    fn emit(&self, event: NavigationEvent) {
        if self.events_tx.send(event).is_err() {
            trace!("navigation event dropped: no listener");
        }
    }
}

impl Drop for Navigator {
    fn drop(&mut self) {
        self.cancel_scan();
    }
}
