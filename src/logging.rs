//! File logging
//!
//! The terminal belongs to the TUI, so events go to a log file. `RUST_LOG`
//! takes precedence over the configured level.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

const DEFAULT_LEVEL: &str = "info";

/// Resolved logging settings after config and CLI overrides
#[derive(Debug, Clone, Default)]
pub struct LogSettings {
    pub level: Option<String>,
    pub file: Option<PathBuf>,
}

impl LogSettings {
    pub fn directive(&self) -> String {
        let level = self.level.as_deref().unwrap_or(DEFAULT_LEVEL);
        if level.contains('=') {
            level.to_string()
        } else {
            format!("chainview={level},warn")
        }
    }
}

fn filter(settings: &LogSettings) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(settings.directive()))
}

/// Install the global subscriber. Returns the log file path on success.
///
/// When no file is configured or it cannot be opened, logging stays off and
/// the error is returned for the caller to report.
pub fn init(settings: &LogSettings) -> Result<PathBuf> {
    let path = settings
        .file
        .clone()
        .or_else(crate::config::default_log_path)
        .context("no location for the log file")?;
    let file = open_log_file(&path)?;

    tracing_subscriber::registry()
        .with(filter(settings))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false),
        )
        .try_init()
        .context("install tracing subscriber")?;

    tracing::info!(path = %path.display(), "logging initialized");
    Ok(path)
}

fn open_log_file(path: &Path) -> Result<fs::File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log file {}", path.display()))
}
