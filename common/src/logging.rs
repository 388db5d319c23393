use anyhow::{Context, Result};
use std::{fs, path::Path};
use time::macros::format_description;
use tracing_appender::{
    non_blocking::WorkerGuard,
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{fmt, fmt::time::LocalTime, prelude::*, EnvFilter};

const LOG_FILE_PREFIX: &str = "wordcount";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

fn timer() -> LocalTime<&'static [time::format_description::FormatItem<'static>]> {
    LocalTime::new(format_description!(
        "[hour]:[minute]:[second].[subsecond digits:3]"
    ))
}

/// Logs to stderr, filtered by `RUST_LOG` (default `info`).
///
/// Does nothing if a global subscriber is already installed.
pub fn init_logger() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_timer(timer())
        .with_writer(std::io::stderr)
        .try_init();
}

/// Like [`init_logger`], and also appends to a daily log file in `dir`.
///
/// Buffered lines are flushed when the returned guard is dropped.
pub fn init_logger_with_dir(dir: &Path) -> Result<WorkerGuard> {
    fs::create_dir_all(dir).with_context(|| format!("create log directory {}", dir.display()))?;
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .filename_suffix("log")
        .build(dir)
        .with_context(|| format!("open log file in {}", dir.display()))?;
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let _ = tracing_subscriber::registry()
        .with(env_filter())
        .with(
            fmt::layer()
                .with_timer(timer())
                .with_writer(std::io::stderr),
        )
        .with(
            fmt::layer()
                .with_timer(timer())
                .with_ansi(false)
                .with_writer(writer),
        )
        .try_init();
    Ok(guard)
}

/// Picks [`init_logger_with_dir`] when a log directory is configured.
pub fn init_logging(log_dir: Option<&Path>) -> Result<Option<WorkerGuard>> {
    match log_dir {
        Some(dir) => init_logger_with_dir(dir).map(Some),
        None => {
            init_logger();
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logger_with_dir() {
        let dir = std::env::temp_dir()
            .join(format!("wc-logs-{}", uuid::Uuid::new_v4()))
            .join("nested");
        let guard = init_logger_with_dir(&dir).unwrap();
        tracing::info!("logging to {}", dir.display());
        drop(guard);

        assert!(dir.is_dir());
        let names: Vec<String> = fs::read_dir(&dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert!(
            names
                .iter()
                .any(|name| name.starts_with(LOG_FILE_PREFIX) && name.ends_with(".log")),
            "{names:?}"
        );
        fs::remove_dir_all(dir.parent().unwrap()).unwrap();
    }
}
