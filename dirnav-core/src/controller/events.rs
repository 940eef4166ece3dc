//! Outbound notifications from the navigation widgets.

use std::path::PathBuf;

use crate::error::NavError;

/// Emitted by [`crate::model::navigation::Navigator`].
#[derive(Debug, Clone)]
pub enum NavigationEvent {
    /// The current location moved; a scan for it has been started.
    LocationChanged(PathBuf),

    /// The displayed rows were recomputed; re-render.
    DisplayUpdated,

    /// A directory-level failure for the error-reporting collaborator.
    Failed(NavError),
}

/// Emitted by [`crate::model::drive_list::DriveList`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriveEvent {
    /// Opaque root identifier such as `C:\` or `/mnt/data`.
    RootSelected(String),
}
