//! Tracing setup.
//!
//! Logs go to stdout and to a daily-rotated file under the configured log directory
//! (`resume-parser.YYYY-MM-DD.log`, 30 files kept). The file writer is non-blocking; its
//! guard is parked in a static so buffered lines are flushed for the process lifetime.

use std::path::Path;
use std::sync::OnceLock;

use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const LOG_FILE_PREFIX: &str = "resume-parser";
const LOG_FILE_SUFFIX: &str = "log";
const MAX_LOG_FILES: usize = 30;

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Install the global subscriber.
///
/// `RUST_LOG` wins when set; otherwise `default_level` applies to this crate.
pub fn init_tracing(log_dir: &Path, default_level: &str) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("{}={default_level},tower_http=info", env!("CARGO_CRATE_NAME")))
    });

    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true));

    match file_writer(log_dir) {
        Some(writer) => registry
            .with(fmt::layer().with_writer(writer).with_ansi(false))
            .init(),
        None => registry.init(),
    }
}

/// Returns `None` when the log directory cannot be created; stdout logging still works.
fn file_writer(log_dir: &Path) -> Option<NonBlocking> {
    if let Err(err) = std::fs::create_dir_all(log_dir) {
        eprintln!("Failed to create log directory {}: {err}", log_dir.display());
        return None;
    }

    let appender = match RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .filename_suffix(LOG_FILE_SUFFIX)
        .max_log_files(MAX_LOG_FILES)
        .build(log_dir)
    {
        Ok(appender) => appender,
        Err(err) => {
            eprintln!("Failed to open rolling log in {}: {err}", log_dir.display());
            return None;
        }
    };

    let (non_blocking, guard) = tracing_appender::non_blocking(appender);
    let _ = LOG_GUARD.set(guard);
    Some(non_blocking)
}
