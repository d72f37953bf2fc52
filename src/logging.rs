//! File-backed tracing setup. The TUI owns the terminal, so events never go
//! to stdout or stderr.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Environment variable holding the tracing filter
pub const LOG_ENV: &str = "TASKTREE_LOG";

pub const DEFAULT_FILTER: &str = "tasktree=info";

/// `$TMPDIR/tasktree.log`
pub fn default_log_path() -> PathBuf {
    std::env::temp_dir().join("tasktree.log")
}

/// Filter from `TASKTREE_LOG`, or the default when unset or invalid
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber, appending to `path`
pub fn init(path: &Path) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_env_filter(env_filter())
        .with_ansi(false)
        .try_init()?;
    Ok(())
}
