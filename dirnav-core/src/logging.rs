//! src/logging.rs
//! ============================================================================
//! # Logging: tracing subscriber writing to a rolling log file
//!
//! The terminal belongs to the picker UI, so nothing is ever written to
//! stdout or stderr. Events go through a non-blocking rolling file appender
//! as plain lines or JSON. `RUST_LOG` directives are honoured alongside the
//! configured level.

use std::{
    path::{Path, PathBuf},
    str::FromStr,
    sync::atomic::{AtomicBool, Ordering},
};

use anyhow::{Context, Result};
use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use tokio::fs as TokioFs;
use tracing_appender::{
    non_blocking::WorkerGuard,
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{
    EnvFilter, Layer, Registry, filter::Directive, layer::SubscriberExt,
    util::SubscriberInitExt,
};

use crate::config::project_dirs;

static LOGGER_ACTIVE: AtomicBool = AtomicBool::new(false);

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    pub log_dir: PathBuf,
    pub log_file_prefix: CompactString,
    pub log_level: CompactString,
    pub max_log_files: usize,
    pub rotation: LogRotation,

    /// One JSON object per line instead of plain text.
    pub json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    Never,
    Daily,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            log_dir: default_log_dir(),
            log_file_prefix: CompactString::const_new("dirnav"),
            log_level: CompactString::const_new("info"),
            max_log_files: 10,
            rotation: LogRotation::Daily,
            json: false,
        }
    }
}

impl LoggerConfig {
    const fn file_suffix(&self) -> &'static str {
        if self.json { "jsonl" } else { "log" }
    }
}

fn default_log_dir() -> PathBuf {
    project_dirs().map_or_else(
        || PathBuf::from("./logs"),
        |dirs| dirs.data_local_dir().join("logs"),
    )
}

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Logger already initialized")]
    AlreadyInitialized,

    #[error("Invalid log directory: {0}")]
    InvalidLogDirectory(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

// Logger builder
#[derive(Debug, Default)]
pub struct LoggerBuilder {
    config: LoggerConfig,
}

impl LoggerBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(mut self, config: LoggerConfig) -> Self {
        self.config = config;
        self
    }

    /// Install the global subscriber. Keep the guard alive until exit so
    /// buffered lines are flushed.
    pub async fn build(self) -> Result<WorkerGuard> {
        if LOGGER_ACTIVE.swap(true, Ordering::SeqCst) {
            return Err(LoggingError::AlreadyInitialized.into());
        }

        let result = self.install().await;
        if result.is_err() {
            LOGGER_ACTIVE.store(false, Ordering::SeqCst);
        }
        result
    }

    async fn install(self) -> Result<WorkerGuard> {
        let config = self.config;
        validate_config(&config)?;
        setup_log_directory(&config.log_dir).await?;

        let rotation = match config.rotation {
            LogRotation::Never => Rotation::NEVER,
            LogRotation::Daily => Rotation::DAILY,
        };

        let file_appender = RollingFileAppender::builder()
            .rotation(rotation)
            .filename_prefix(config.log_file_prefix.as_str())
            .filename_suffix(config.file_suffix())
            .max_log_files(config.max_log_files)
            .build(&config.log_dir)
            .context("Failed to create file appender")?;

        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        let filter = EnvFilter::from_default_env().add_directive(
            Directive::from_str(&config.log_level).context("Invalid log level in config")?,
        );

        let fmt_layer: Box<dyn Layer<Registry> + Send + Sync> = if config.json {
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(non_blocking)
                .boxed()
        } else {
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(non_blocking)
                .boxed()
        };

        tracing_subscriber::registry()
            .with(fmt_layer.with_filter(filter))
            .try_init()
            .context("Failed to install global tracing subscriber")?;

        Ok(guard)
    }
}

fn validate_config(config: &LoggerConfig) -> Result<()> {
    if config.log_file_prefix.is_empty() {
        return Err(
            LoggingError::ConfigError("Log file prefix must not be empty".to_string()).into(),
        );
    }

    if config.max_log_files == 0 {
        return Err(
            LoggingError::ConfigError("Max log files must be greater than 0".to_string()).into(),
        );
    }

    validate_log_directory(&config.log_dir)?;
    Ok(())
}

fn validate_log_directory(path: &Path) -> Result<()> {
    if path.components().count() == 0 {
        return Err(LoggingError::InvalidLogDirectory("Empty path".to_string()).into());
    }

    for component in path.components() {
        if component == std::path::Component::ParentDir {
            return Err(LoggingError::InvalidLogDirectory(
                "Path contains parent directory references".to_string(),
            )
            .into());
        }
    }

    Ok(())
}

async fn setup_log_directory(log_dir: &Path) -> Result<()> {
    TokioFs::create_dir_all(log_dir)
        .await
        .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))
}

pub async fn init_logging_with_config(config: LoggerConfig) -> Result<WorkerGuard> {
    LoggerBuilder::new().with_config(config).build().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_log_directory_validation() {
        assert!(validate_log_directory(Path::new("")).is_err());
        assert!(validate_log_directory(Path::new("logs/../etc")).is_err());
        assert!(validate_log_directory(Path::new("/var/log/dirnav")).is_ok());
    }

    #[test]
    fn test_config_validation() {
        let config = LoggerConfig {
            max_log_files: 0,
            ..LoggerConfig::default()
        };
        assert!(validate_config(&config).is_err());

        let config = LoggerConfig {
            log_file_prefix: CompactString::default(),
            ..LoggerConfig::default()
        };
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_rotation_parses_lowercase() {
        let config: LoggerConfig =
            toml::from_str("rotation = \"never\"\njson = true\n").unwrap();

        assert_eq!(config.rotation, LogRotation::Never);
        assert!(config.json);
        assert_eq!(config.file_suffix(), "jsonl");
    }

    // The only test in this crate that installs the global subscriber.
    #[tokio::test]
    async fn test_second_init_is_rejected() {
        let temp = TempDir::new().unwrap();
        let config = LoggerConfig {
            log_dir: temp.path().join("logs"),
            ..LoggerConfig::default()
        };

        let _guard = init_logging_with_config(config.clone()).await.unwrap();
        assert!(temp.path().join("logs").is_dir());

        let err = init_logging_with_config(config).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LoggingError>(),
            Some(LoggingError::AlreadyInitialized)
        ));
    }
}
