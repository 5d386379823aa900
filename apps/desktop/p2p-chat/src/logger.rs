//! Logging for the p2p-chat console.
//!
//! Two sinks share one line format, `[<rfc3339> - <LEVEL>] <message> [<file>:<line>]`:
//! - `p2p-chat.log`, every crate at the build's level
//! - stderr, coloured, only this crate's warnings and errors
//!
//! Stdout is left to the rendered display, and user-facing failures already
//! reach stderr as alerts, so client-core records stay out of the terminal.

use crate::error::ChatAppError;

use common::ErrorLocation;

use std::fmt::{Arguments, Display};
use std::io::stderr;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::sync::Once;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::SystemTime;

use fern::colors::Color::{Blue, Green, Magenta, Red, Yellow};
use fern::colors::ColoredLevelConfig;
use fern::{Dispatch, FormatCallback};
use humantime::format_rfc3339;
use log::{Level, LevelFilter, Metadata, Record, info, warn};

static INIT_LOGGER_ONCE: Once = Once::new();
static LOGGER_ALREADY_CALLED: AtomicBool = AtomicBool::new(false);

pub const LOG_FILE_NAME: &str = "p2p-chat.log";

/// Records from targets outside this prefix never reach the terminal.
const CONSOLE_TARGET_PREFIX: &str = "p2p_chat";

#[cfg(debug_assertions)]
const LOG_LEVEL: LevelFilter = LevelFilter::Debug;

#[cfg(not(debug_assertions))]
const LOG_LEVEL: LevelFilter = LevelFilter::Info;

/// Install the global logger.
///
/// Only the first call does anything; later calls log a warning and return Ok,
/// even if the first one failed.
///
/// # Errors
///
/// Returns [`ChatAppError::App`] if the log file cannot be opened or another
/// global logger is already installed.
pub fn initialize(log_dir: &Path) -> Result<(), ChatAppError> {
    if LOGGER_ALREADY_CALLED.swap(true, Ordering::SeqCst) {
        warn!("Logger already initialized");
        return Ok(());
    }

    let mut result = Ok(());
    INIT_LOGGER_ONCE.call_once(|| {
        result = install(log_dir);
        if result.is_ok() {
            info!("Logging to {} at {LOG_LEVEL:?}", log_file_path(log_dir).display());
        }
    });
    result
}

pub fn log_file_path(log_dir: &Path) -> PathBuf {
    log_dir.join(LOG_FILE_NAME)
}

/// Whether a record is echoed on the terminal.
pub fn shows_on_console(metadata: &Metadata<'_>) -> bool {
    metadata.level() <= Level::Warn && metadata.target().starts_with(CONSOLE_TARGET_PREFIX)
}

#[track_caller]
fn install(log_dir: &Path) -> Result<(), ChatAppError> {
    let log_file = fern::log_file(log_file_path(log_dir)).map_err(|e| ChatAppError::App {
        message: format!("Failed to create log file: {e}"),
        location: ErrorLocation::from(Location::caller()),
    })?;

    let file_dispatch = Dispatch::new()
        .format(|out, message, record| finish_line(out, message, record, record.level()))
        .chain(log_file);

    Dispatch::new()
        .level(LOG_LEVEL)
        .chain(console_dispatch())
        .chain(file_dispatch)
        .apply()
        .map_err(|e| ChatAppError::App {
            message: format!("Failed to initialize logger: {e}"),
            location: ErrorLocation::from(Location::caller()),
        })
}

fn console_dispatch() -> Dispatch {
    let colors = ColoredLevelConfig::new()
        .debug(Blue)
        .info(Green)
        .warn(Yellow)
        .error(Red)
        .trace(Magenta);

    Dispatch::new()
        .filter(shows_on_console)
        .format(move |out, message, record| {
            finish_line(out, message, record, colors.color(record.level()))
        })
        .chain(stderr())
}

fn finish_line(
    out: FormatCallback<'_>,
    message: &Arguments<'_>,
    record: &Record<'_>,
    level: impl Display,
) {
    out.finish(format_args!(
        "[{date} - {level}] {message} [{file}:{line}]",
        date = format_rfc3339(SystemTime::now()),
        file = record.file().unwrap_or("unknown"),
        line = record.line().unwrap_or(0),
    ))
}
