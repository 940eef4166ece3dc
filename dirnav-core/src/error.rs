//! src/error.rs
//! ============================================================================
//! # `NavError`: Unified Error Type for Directory Navigation
//!
//! Every fallible operation in the library returns `Result<T, NavError>`.
//! Directory-level failures (`ResolutionFailed`, `EnumerationFailed`) are
//! surfaced to listeners; per-entry failures (`EntryMetadataUnavailable`)
//! stay inside the scan worker and only ever show up in logs.

use std::{
    io::{self, ErrorKind},
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Convenient alias carrying the unified error type.
pub type NavResult<T> = Result<T, NavError>;

/// Unified error type for navigation, scanning and configuration.
#[derive(Debug, Error)]
pub enum NavError {
    /// The requested location could not be resolved to an absolute path.
    #[error("Cannot resolve {path:?}: {source}")]
    ResolutionFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Listing the children of a directory failed as a whole.
    #[error("Cannot list {path:?}: {source}")]
    EnumerationFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Metadata for a single child could not be read.
    #[error("Metadata unavailable for {path:?}: {source}")]
    EntryMetadataUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// TOML config parsing error.
    #[error("Config parse error: {0}")]
    Config(#[from] toml::de::Error),

    /// Config file I/O error with path.
    #[error("Failed to access config file {path:?}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl NavError {
    /// Create a resolution failure error
    pub fn resolution_failed<P: Into<PathBuf>>(path: P, source: io::Error) -> Self {
        Self::ResolutionFailed {
            path: path.into(),
            source,
        }
    }

    /// Create an enumeration failure error
    pub fn enumeration_failed<P: Into<PathBuf>>(path: P, source: io::Error) -> Self {
        Self::EnumerationFailed {
            path: path.into(),
            source,
        }
    }

    /// Create a per-entry metadata error
    pub fn metadata_unavailable<P: Into<PathBuf>>(path: P, source: io::Error) -> Self {
        Self::EntryMetadataUnavailable {
            path: path.into(),
            source,
        }
    }

    /// The path the error is about, if it carries one.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::ResolutionFailed { path, .. }
            | Self::EnumerationFailed { path, .. }
            | Self::EntryMetadataUnavailable { path, .. }
            | Self::ConfigIo { path, .. } => Some(path),
            Self::Config(_) => None,
        }
    }

    /// Underlying I/O error kind, if any.
    #[must_use]
    pub fn io_kind(&self) -> Option<ErrorKind> {
        match self {
            Self::ResolutionFailed { source, .. }
            | Self::EnumerationFailed { source, .. }
            | Self::EntryMetadataUnavailable { source, .. }
            | Self::ConfigIo { source, .. } => Some(source.kind()),
            Self::Config(_) => None,
        }
    }

    /// True for failures that affect a whole directory rather than one entry.
    #[must_use]
    pub const fn is_directory_level(&self) -> bool {
        matches!(
            self,
            Self::ResolutionFailed { .. } | Self::EnumerationFailed { .. }
        )
    }
}

fn clone_io(e: &io::Error) -> io::Error {
    io::Error::new(e.kind(), e.to_string())
}

// Manual Clone implementation to handle non-Clone fields
impl Clone for NavError {
    fn clone(&self) -> Self {
        match self {
            Self::ResolutionFailed { path, source } => Self::ResolutionFailed {
                path: path.clone(),
                source: clone_io(source),
            },
            Self::EnumerationFailed { path, source } => Self::EnumerationFailed {
                path: path.clone(),
                source: clone_io(source),
            },
            Self::EntryMetadataUnavailable { path, source } => Self::EntryMetadataUnavailable {
                path: path.clone(),
                source: clone_io(source),
            },
            Self::Config(e) => Self::Config(e.clone()),
            Self::ConfigIo { path, source } => Self::ConfigIo {
                path: path.clone(),
                source: clone_io(source),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clone_keeps_kind_and_path() {
        let err = NavError::enumeration_failed(
            "/missing",
            io::Error::new(ErrorKind::NotFound, "gone"),
        );
        let cloned = err.clone();

        assert_eq!(cloned.io_kind(), Some(ErrorKind::NotFound));
        assert_eq!(cloned.path(), Some(Path::new("/missing")));
        assert!(cloned.is_directory_level());
        assert_eq!(err.to_string(), cloned.to_string());
    }

    #[test]
    fn test_entry_errors_are_not_directory_level() {
        let err = NavError::metadata_unavailable(
            "/a/b",
            io::Error::new(ErrorKind::PermissionDenied, "nope"),
        );
        assert!(!err.is_directory_level());
    }

    #[test]
    fn test_clone_keeps_config_parse_error() {
        let parse_err = toml::from_str::<toml::Table>("key = ").unwrap_err();
        let err = NavError::from(parse_err);
        let cloned = err.clone();

        assert!(matches!(cloned, NavError::Config(_)));
        assert_eq!(cloned.path(), None);
        assert_eq!(err.to_string(), cloned.to_string());
    }
}
