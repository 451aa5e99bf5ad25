//! Operations-log setup
//!
//! Every unify run writes its own `operations.log` into the freshly created
//! destination root, so the log ships with the unified resource it
//! describes.

use std::fs::{self, File};
use std::path::Path;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::Result;

/// Install the global subscriber writing to the run's operations log.
///
/// Records are timestamped and severity-tagged, without ANSI escapes.
/// The level defaults to `info` and can be overridden through `RUST_LOG`.
///
/// # Returns
/// A guard that must be held for the duration of the run to keep the
/// background writer flushing.
pub fn init_operations_log(
    log_file: &Path,
) -> Result<tracing_appender::non_blocking::WorkerGuard> {
    if let Some(parent) = log_file.parent() {
        fs::create_dir_all(parent)?;
    }

    let (writer, guard) = tracing_appender::non_blocking(File::create(log_file)?);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(false),
        )
        .init();

    Ok(guard)
}
