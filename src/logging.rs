//! File logging for the CLI
//!
//! Events go to `bluecat-gss.log` under the user config directory through a
//! non-blocking writer. `--log-level` sets the default; `RUST_LOG` directives
//! override it per target.

use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

pub const LOG_FILE: &str = "bluecat-gss.log";

/// Directory holding the log file
pub fn log_dir() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join("bluecat-gss"))
        .or_else(|| dirs::home_dir().map(|home| home.join(".bluecat-gss")))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Install the global subscriber writing to `dir`.
///
/// Returns the writer guard, which must live until exit. `None` when logging
/// is off, the file cannot be opened, or a subscriber is already installed.
pub fn init(level: LevelFilter, dir: &Path) -> Option<WorkerGuard> {
    if level == LevelFilter::OFF {
        return None;
    }

    let appender = match RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(LOG_FILE)
        .build(dir)
    {
        Ok(appender) => appender,
        Err(err) => {
            eprintln!("Cannot open log file in {}: {err}", dir.display());
            return None;
        }
    };

    let (writer, guard) = tracing_appender::non_blocking(appender);
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .with_file(true)
        .with_line_number(true)
        .try_init()
        .ok()?;

    tracing::info!(log_file = %dir.join(LOG_FILE).display(), %level, "bluecat-gss logging started");
    Some(guard)
}
