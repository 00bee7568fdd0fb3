//! Logging for pressdesk.
//!
//! Events go to `pressdesk.log` in the platform cache directory
//! (`~/.cache/pressdesk/` on Linux). `PRESSDESK_LOG` sets the filter
//! directive (default `info`) and, when present, mirrors output to stderr.
//!
//! ```bash
//! # Watch bulk actions while using the list view
//! tail -f ~/.cache/pressdesk/pressdesk.log
//!
//! # Filter and selection changes on stderr
//! PRESSDESK_LOG=pressdesk=debug pressdesk list . content --filter status=draft
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt::{self, format::FmtSpan}, prelude::*, EnvFilter};

/// Environment variable holding the filter directive
pub const LOG_ENV: &str = "PRESSDESK_LOG";

const LOG_FILE: &str = "pressdesk.log";

/// Install the global subscriber.
///
/// The returned guard flushes the file writer when dropped; hold it for
/// the life of the program.
pub fn init_logging() -> Result<WorkerGuard> {
    let cache_dir = cache_dir().context("Failed to determine cache directory")?;

    std::fs::create_dir_all(&cache_dir)
        .with_context(|| format!("Failed to create cache directory: {}", cache_dir.display()))?;

    let log_file = cache_dir.join(LOG_FILE);
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file)
        .with_context(|| format!("Failed to open log file: {}", log_file.display()))?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    let log_env = std::env::var(LOG_ENV).ok();
    let verbose = log_env.is_some();
    let filter = EnvFilter::try_new(log_env.as_deref().unwrap_or("info"))
        .with_context(|| format!("Invalid {} directive", LOG_ENV))?;

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_span_events(FmtSpan::CLOSE);

    // The TUI owns the terminal, so stderr output is opt-in
    let stderr_layer = verbose.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_ids(false)
            .with_span_events(FmtSpan::CLOSE)
    });

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer);

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set global tracing subscriber")?;

    Ok(guard)
}

/// Where the log file lives, if the platform has a cache directory
pub fn log_file_path() -> Option<PathBuf> {
    cache_dir().map(|dir| dir.join(LOG_FILE))
}

fn cache_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "pressdesk").map(|dirs| dirs.cache_dir().to_path_buf())
}
