//! Tracing setup
//!
//! The wizard draws on the terminal, so log output goes to a file instead of
//! stderr. Failing to open the file disables logging rather than the wizard.

use anyhow::{Context, Result};
use std::fs::{self, File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::{default_log_path, LogConfig};

/// Environment variable that overrides the configured log filter
pub const LOG_ENV: &str = "CREATE_STARTER_LOG";

pub fn init(config: &LogConfig) {
    let Some(path) = config.file.clone().or_else(default_log_path) else {
        return;
    };
    let Ok(file) = open_log_file(&path) else {
        return;
    };

    let _ = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .with(build_filter(config))
        .try_init();
}

fn build_filter(config: &LogConfig) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open {}", path.display()))
}
