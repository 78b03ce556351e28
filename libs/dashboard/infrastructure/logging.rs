//! Logging initialization
//!
//! The terminal UI owns stdout while it runs (tracing output would corrupt
//! the alternate screen), so traces go to a log file instead.

use anyhow::{anyhow, Result};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Initialize tracing into an append-only log file
///
/// `RUST_LOG` takes precedence over `level` when set.
pub fn init_file_tracing(log_file: impl AsRef<Path>, level: &str) -> Result<()> {
    let path = log_file.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_line_number(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| anyhow!("Failed to install tracing subscriber: {}", e))
}
