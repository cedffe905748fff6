//! Logging infrastructure for Video to GIF.
//!
//! Two layers:
//! - application diagnostics through `tracing`, to stderr and optionally a
//!   daily-rolling file in the logs folder
//! - a per-export [`ExportLogger`] whose formatted lines go to the GUI log
//!   view, with a tail buffer of tool output for failure diagnosis
//!
//! # Example
//!
//! ```no_run
//! use gif_core::logging::{ExportLogger, LogConfig};
//!
//! let logger = ExportLogger::new(
//!     LogConfig::default(),
//!     Some(Box::new(|line| println!("{line}"))),
//! );
//!
//! logger.phase("Palette generation");
//! logger.command("ffmpeg -i clip.mp4 ...");
//! logger.success("GIF created");
//! ```

mod export_logger;
mod types;

use std::path::Path;

pub use export_logger::ExportLogger;
pub use types::{GuiLogCallback, LogConfig, LogLevel, MessagePrefix};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Prefix of the daily log files.
pub const LOG_FILE_PREFIX: &str = "video-to-gif";

/// Initialize the global tracing subscriber (stderr only).
///
/// `RUST_LOG` overrides `default_level`. Calling this twice is harmless.
pub fn init_tracing(default_level: LogLevel) {
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(false))
        .with(env_filter(default_level))
        .try_init();
}

/// Initialize tracing to stderr and a daily log file in `log_dir`.
///
/// Returns the guard that flushes the file writer; keep it alive for the
/// lifetime of the program. If the file cannot be opened, logging falls
/// back to stderr only and `None` is returned.
pub fn init_tracing_with_file(default_level: LogLevel, log_dir: &Path) -> Option<WorkerGuard> {
    let appender = match RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .filename_suffix("log")
        .build(log_dir)
    {
        Ok(appender) => appender,
        Err(e) => {
            init_tracing(default_level);
            tracing::warn!("File logging disabled ({}): {}", log_dir.display(), e);
            return None;
        }
    };

    let (writer, guard) = tracing_appender::non_blocking(appender);

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(false))
        .with(fmt::layer().with_ansi(false).with_writer(writer))
        .with(env_filter(default_level))
        .try_init();

    Some(guard)
}

/// Initialize tracing for tests (only logs warnings and above).
#[cfg(test)]
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("warn")
        .with_test_writer()
        .try_init();
}

fn env_filter(default_level: LogLevel) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level.as_filter_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn file_logging_returns_guard() {
        let dir = tempdir().unwrap();
        let guard = init_tracing_with_file(LogLevel::Info, dir.path());
        assert!(guard.is_some());
        tracing::info!("written to the rolling file");
    }
}
