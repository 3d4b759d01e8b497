use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

pub const LOG_FILE_NAME: &str = "kubeclient-demos.log";

/// Filter used when `RUST_LOG` is unset.
pub fn default_directive(verbose: bool) -> String {
    let level = if verbose { "debug" } else { "info" };
    format!("kubeclient_demos={}", level)
}

/// Daily rolling appender under `dir`, created if missing.
pub fn rolling_file_appender(dir: &Path) -> Result<RollingFileAppender> {
    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_NAME)
        .build(dir)
        .with_context(|| format!("failed to open log directory {}", dir.display()))
}

/// Install the global subscriber: stderr always, plus a daily rolling file
/// under `log_dir` when one is given. Keep the guard alive until exit so
/// buffered file lines get flushed.
///
/// If the log directory is unusable the subscriber is still installed
/// without the file layer, and the error is returned for the caller to log.
pub fn init_tracing(verbose: bool, log_dir: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_directive(verbose).into());

    let (appender, failure) = match log_dir.map(rolling_file_appender).transpose() {
        Ok(appender) => (appender, None),
        Err(e) => (None, Some(e)),
    };

    let (file_layer, guard) = match appender {
        Some(appender) => {
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .boxed();
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .init();

    match failure {
        Some(e) => Err(e),
        None => Ok(guard),
    }
}
