// src/log.rs
use std::fs::OpenOptions;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::error::{Error, Result};

const DEFAULT_FILTER: &str = "facility_images=info";
const VERBOSE_FILTER: &str = "facility_images=debug";

/// Install the global tracing subscriber.
///
/// Logs go to stderr so stdout stays free for progress lines.
/// `RUST_LOG` wins over `verbose` when set. With `log_file`, every event is
/// also appended (no ANSI) to that file; keep the returned guard alive until
/// exit so buffered lines get flushed.
pub fn init(verbose: bool, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose { VERBOSE_FILTER } else { DEFAULT_FILTER })
    });

    let stderr_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);

    let mut guard = None;
    let file_layer = match log_file {
        Some(path) => {
            if let Some(parent) = path.parent() {
                crate::file::ensure_directory(parent)?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|source| Error::Io { path: path.to_path_buf(), source })?;
            let (writer, g) = tracing_appender::non_blocking(file);
            guard = Some(g);
            Some(fmt::layer().with_writer(writer).with_ansi(false))
        }
        None => None,
    };

    // A second init (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init();
    Ok(guard)
}

/// Info-level logging
#[macro_export]
macro_rules! logf {
    ($($arg:tt)*) => {
        ::tracing::info!($($arg)*)
    };
}

/// Debug-level logging
#[macro_export]
macro_rules! logd {
    ($($arg:tt)*) => {
        ::tracing::debug!($($arg)*)
    };
}

/// Warn-level logging
#[macro_export]
macro_rules! logw {
    ($($arg:tt)*) => {
        ::tracing::warn!($($arg)*)
    };
}

/// Error-level logging
#[macro_export]
macro_rules! loge {
    ($($arg:tt)*) => {
        ::tracing::error!($($arg)*)
    };
}
