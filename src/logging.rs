//! File logging; the terminal belongs to the TUI so log lines never go to stdout/stderr

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::non_blocking;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const LOG_FILE: &str = "hrdash.log";
pub const LOG_ENV: &str = "HRDASH_LOG";

/// `HRDASH_LOG` wins over the configured level; bad directives fall back to info
pub fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber. Keep the returned guard alive until exit
/// or buffered lines are lost.
pub fn init(log_dir: &Path, default_level: &str) -> Result<WorkerGuard> {
    fs::create_dir_all(log_dir)
        .with_context(|| format!("failed to create log directory {}", log_dir.display()))?;

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE)
        .build(log_dir)
        .with_context(|| format!("failed to open log file in {}", log_dir.display()))?;
    let (writer, guard) = non_blocking(appender);

    tracing_subscriber::registry()
        .with(env_filter(default_level))
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .try_init()
        .context("failed to install tracing subscriber")?;

    Ok(guard)
}

/// Like [`init`], but a failure leaves tracing without a subscriber (every
/// event is discarded) instead of stopping start-up.
pub fn init_or_disable(log_dir: &Path, default_level: &str) -> Option<WorkerGuard> {
    match init(log_dir, default_level) {
        Ok(guard) => Some(guard),
        Err(err) => {
            // Printed before the TUI takes over the terminal
            eprintln!("hrdash: logging disabled: {err:#}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unusable_log_dir_disables_logging() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        fs::write(&blocker, b"").unwrap();
        let log_dir = blocker.join("logs");

        assert!(init(&log_dir, "info").is_err());
        assert!(init_or_disable(&log_dir, "info").is_none());
        tracing::info!("still fine without a subscriber");
    }
}
