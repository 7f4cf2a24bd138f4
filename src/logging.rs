//! Logging initialization using the `tracing` crate.
//!
//! `RUST_LOG` controls filtering (default: `warn,hybrid_desk=info`). The
//! launcher owns the terminal, so while it runs logs go to a file; one-shot
//! commands log to stderr.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::Context;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

const DEFAULT_FILTER: &str = "warn,hybrid_desk=info";

/// Where log output should go
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
}

/// Log file used by the launcher when the config does not name one
pub fn default_log_file() -> PathBuf {
    std::env::temp_dir().join("hdesk.log")
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber. Call once, before anything logs.
pub fn init(target: &LogTarget) -> anyhow::Result<()> {
    match target {
        LogTarget::Stderr => {
            let layer = fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact();
            tracing_subscriber::registry()
                .with(env_filter())
                .with(layer)
                .try_init()?;
        }
        LogTarget::File(path) => {
            let file = open_log_file(path)?;
            let layer = fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(true);
            tracing_subscriber::registry()
                .with(env_filter())
                .with(layer)
                .try_init()?;
        }
    }

    tracing::debug!("logging initialized");
    Ok(())
}

fn open_log_file(path: &Path) -> anyhow::Result<std::fs::File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))
}
