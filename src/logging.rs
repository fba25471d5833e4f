//! Diagnostics for a run.
//!
//! Logs go to stderr so that stdout only carries the identifier list or the
//! rewrite report. Reads `RUST_LOG`, defaulting to `info`.
//!
//! ```bash
//! RUST_LOG=build_versions=debug build-versions --print
//! ```

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{LogConfig, LogFormat};

const DEFAULT_FILTER: &str = "info";

/// Installs the global subscriber.
///
/// The returned guard flushes the log file on drop and must be held until
/// the run finishes.
pub fn init(config: &LogConfig) -> Result<Option<WorkerGuard>, TryInitError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let stderr = match config.format {
        LogFormat::Compact => fmt::layer()
            .with_writer(std::io::stderr)
            .compact()
            .boxed(),
        LogFormat::Json => fmt::layer().with_writer(std::io::stderr).json().boxed(),
    };

    let (file, guard) = match config.file.as_deref() {
        Some(path) => {
            let (writer, guard) = tracing_appender::non_blocking(file_appender(path));
            let layer = fmt::layer().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr)
        .with(file)
        .try_init()?;

    Ok(guard)
}

fn file_appender(path: &Path) -> tracing_appender::rolling::RollingFileAppender {
    let directory = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_else(|| "build-versions.log".into());

    tracing_appender::rolling::never(directory, file_name)
}
