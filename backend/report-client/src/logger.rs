//! Logging for hosts embedding the report client.
//!
//! Colored stdout plus a plain log file, initialized at most once per process.

use crate::error::ConfigError;

use common::ErrorLocation;

use std::io::stdout;
use std::panic::Location;
use std::path::Path;
use std::sync::Once;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::SystemTime;

use fern::Dispatch;
use fern::colors::Color::{Blue, Green, Magenta, Red, Yellow};
use fern::colors::ColoredLevelConfig;
use humantime::format_rfc3339;
use log::{LevelFilter, info, warn};

static INIT_LOGGER_ONCE: Once = Once::new();

static LOGGER_ALREADY_CALLED: AtomicBool = AtomicBool::new(false);

pub const LOG_FILE_NAME: &str = "report-client.log";

#[cfg(debug_assertions)]
const LOG_LEVEL: LevelFilter = LevelFilter::Debug;

#[cfg(not(debug_assertions))]
const LOG_LEVEL: LevelFilter = LevelFilter::Info;

/// Initialize logging to stdout and `<log_dir>/report-client.log`.
///
/// Later calls log a warning and return Ok.
///
/// # Errors
///
/// Returns [`ConfigError::Logger`] if the log file cannot be created or
/// another logger is already installed.
pub fn initialize(log_dir: &Path) -> Result<(), ConfigError> {
    if LOGGER_ALREADY_CALLED.swap(true, Ordering::SeqCst) {
        warn!("Logger already initialized");
        return Ok(());
    }

    let mut result = Ok(());

    INIT_LOGGER_ONCE.call_once(|| {
        result = initialize_internal(log_dir);
        if result.is_ok() {
            info!("Report client logger initialized with level: {LOG_LEVEL:?}");
        }
    });

    result
}

#[track_caller]
fn initialize_internal(log_dir: &Path) -> Result<(), ConfigError> {
    let log_file_path = log_dir.join(LOG_FILE_NAME);

    let color_configuration = ColoredLevelConfig::new()
        .debug(Blue)
        .info(Green)
        .warn(Yellow)
        .error(Red)
        .trace(Magenta);

    let stdout_dispatch = Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{date} - {level}] {target}: {message}",
                date = format_rfc3339(SystemTime::now()),
                level = color_configuration.color(record.level()),
                target = record.target(),
            ))
        })
        .chain(stdout());

    let log_file = fern::log_file(&log_file_path).map_err(|e| ConfigError::Logger {
        reason: format!("Failed to create log file {}: {e}", log_file_path.display()),
        location: ErrorLocation::from(Location::caller()),
    })?;

    let file_dispatch = Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{date} - {level}] {message} [{file}:{line}]",
                date = format_rfc3339(SystemTime::now()),
                level = record.level(),
                file = record.file().unwrap_or("unknown"),
                line = record.line().unwrap_or(0),
            ))
        })
        .chain(log_file);

    Dispatch::new()
        .level(LOG_LEVEL)
        // wiremock and hyper are noisy at debug
        .level_for("hyper_util", LevelFilter::Info)
        .level_for("wiremock", LevelFilter::Info)
        .chain(stdout_dispatch)
        .chain(file_dispatch)
        .apply()
        .map_err(|e| ConfigError::Logger {
            reason: format!("Failed to initialize logger: {e}"),
            location: ErrorLocation::from(Location::caller()),
        })?;

    Ok(())
}
