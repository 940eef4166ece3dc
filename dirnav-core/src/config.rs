//! src/config.rs
//! ============================================================================
//! # Config: navigator settings loaded from TOML
//!
//! Lives in the platform config directory (via the
//! [`directories`](https://docs.rs/directories) crate) as `config.toml`.
//! Every section and field is optional; anything missing falls back to its
//! default, so a partial file written by hand still loads.
//!
//! ## Example
//! ```rust,ignore
//! let config = Config::load().await?;
//! let start = config.navigation.start_location();
//! ```

use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tokio::fs as TokioFs;
use tracing::info;

use crate::error::{NavError, NavResult};
use crate::logging::LoggerConfig;
use crate::model::projection::DisplayOptions;
use crate::util::paths::{default_start_location, expand_home};

const APP_QUALIFIER: &str = "org";
const APP_ORGANIZATION: &str = "dirnav";
const APP_NAME: &str = "dirnav";

/// `[navigation]`: where to start and the initial display flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Starting directory; `~` is expanded. Home directory when unset.
    pub start_location: Option<PathBuf>,

    pub show_hidden: bool,

    pub sort_enabled: bool,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            start_location: None,
            show_hidden: false,
            sort_enabled: true,
        }
    }
}

impl NavigationConfig {
    #[must_use]
    pub fn start_location(&self) -> PathBuf {
        self.start_location
            .as_deref()
            .map_or_else(default_start_location, expand_home)
    }

    #[must_use]
    pub const fn display_options(&self) -> DisplayOptions {
        DisplayOptions {
            show_hidden: self.show_hidden,
            sort_enabled: self.sort_enabled,
        }
    }
}

/// `[display]`: picker layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Show the drive column next to the directory table.
    pub show_drives: bool,

    /// Show the modification time column.
    pub show_modified: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            show_drives: true,
            show_modified: true,
        }
    }
}

/// Main configuration struct.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub navigation: NavigationConfig,

    #[serde(default)]
    pub display: DisplayConfig,

    #[serde(default)]
    pub logging: LoggerConfig,
}

impl Config {
    /// Loads config from the platform config dir, creating a default file
    /// there if none exists yet.
    pub async fn load() -> anyhow::Result<Self> {
        let path = Self::config_path()?;

        if TokioFs::try_exists(&path).await.unwrap_or(false) {
            info!("Loading config from {}", path.display());
            Ok(Self::load_from(&path).await?)
        } else {
            info!(
                "No config file found at {}, using default configuration. Creating it now.",
                path.display()
            );

            let default_config = Self::default();
            default_config.save().await?;

            Ok(default_config)
        }
    }

    /// Saves config to the platform config dir.
    pub async fn save(&self) -> anyhow::Result<()> {
        let path = Self::config_path()?;
        self.save_to(&path).await?;
        Ok(())
    }

    pub async fn load_from(path: &Path) -> NavResult<Self> {
        let text = TokioFs::read_to_string(path)
            .await
            .map_err(|source| NavError::ConfigIo {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(toml::from_str(&text)?)
    }

    pub async fn save_to(&self, path: &Path) -> NavResult<()> {
        info!("Saving config to {}", path.display());

        let io_err = |source: io::Error| NavError::ConfigIo {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            TokioFs::create_dir_all(parent).await.map_err(io_err)?;
        }

        let toml_str = toml::to_string_pretty(self)
            .map_err(|e| io_err(io::Error::new(ErrorKind::InvalidData, e)))?;

        TokioFs::write(path, toml_str).await.map_err(io_err)
    }

    /// Returns the canonical config file path.
    pub fn config_path() -> anyhow::Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the config directory (without filename).
    pub fn config_dir() -> anyhow::Result<PathBuf> {
        let proj_dirs = project_dirs()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory."))?;
        Ok(proj_dirs.config_dir().to_path_buf())
    }
}

pub(crate) fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
}
