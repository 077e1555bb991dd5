//! Tracing setup: a stderr layer plus an optional non-blocking file layer.

use std::fs::{self, File};
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use coverletter_core::config::types::LoggingConfig;
use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::util::TryInitError;

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("cannot open log file {path}: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not install the log subscriber: {0}")]
    Install(#[from] TryInitError),
}

/// Handle on the file writer's worker thread.
///
/// Queued lines reach the file only once [`LogFlush::flush`] runs, so every
/// way out of the process has to call it. Clones share the same worker.
#[derive(Clone, Default)]
pub struct LogFlush(Arc<Mutex<Option<WorkerGuard>>>);

impl LogFlush {
    fn holding(guard: WorkerGuard) -> Self {
        Self(Arc::new(Mutex::new(Some(guard))))
    }

    /// Drain pending lines and stop the worker. Later calls do nothing.
    pub fn flush(&self) {
        if let Ok(mut guard) = self.0.lock() {
            guard.take();
        }
    }
}

/// Install the global subscriber described by `cfg`.
///
/// `RUST_LOG` overrides the configured levels for both layers.
pub fn init(cfg: &LoggingConfig) -> Result<LogFlush, LoggingError> {
    let stderr_level = level_or(&cfg.level, LevelFilter::WARN);
    let stderr_layer = fmt::layer()
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .with_filter(filter_at(stderr_level));

    let Some(path) = cfg.file.as_deref() else {
        tracing_subscriber::registry().with(stderr_layer).try_init()?;
        return Ok(LogFlush::default());
    };

    let file = open_log_file(path)?;
    let (writer, guard) = tracing_appender::non_blocking(file);
    let file_level = cfg
        .file_level
        .as_deref()
        .map_or(stderr_level, |level| level_or(level, LevelFilter::DEBUG));
    let file_layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_file(true)
        .with_line_number(true)
        .with_filter(filter_at(file_level));

    tracing_subscriber::registry().with(stderr_layer).with(file_layer).try_init()?;
    Ok(LogFlush::holding(guard))
}

fn open_log_file(path: &Path) -> Result<File, LoggingError> {
    let fail = |source| LoggingError::File { path: path.to_path_buf(), source };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(fail)?;
    }
    File::create(path).map_err(fail)
}

fn filter_at(level: LevelFilter) -> EnvFilter {
    EnvFilter::builder().with_default_directive(level.into()).from_env_lossy()
}

fn level_or(name: &str, fallback: LevelFilter) -> LevelFilter {
    name.trim().parse().unwrap_or(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_level_or() {
        assert_eq!(level_or("off", LevelFilter::WARN), LevelFilter::OFF);
        assert_eq!(level_or("Info", LevelFilter::WARN), LevelFilter::INFO);
        assert_eq!(level_or(" debug ", LevelFilter::WARN), LevelFilter::DEBUG);
        assert_eq!(level_or("loud", LevelFilter::WARN), LevelFilter::WARN);
        assert_eq!(level_or("", LevelFilter::ERROR), LevelFilter::ERROR);
    }

    #[test]
    fn test_log_file_parent_is_created() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("logs/nested/run.log");

        open_log_file(&path).unwrap();
        assert!(path.is_file());
    }

    #[test]
    fn test_unwritable_log_file_is_an_error() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().to_path_buf();

        match open_log_file(&path) {
            Err(LoggingError::File { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("expected File error, got {other:?}"),
        }
    }

    #[test]
    fn test_flush_is_idempotent() {
        let flush = LogFlush::default();
        flush.flush();
        flush.clone().flush();
    }
}
