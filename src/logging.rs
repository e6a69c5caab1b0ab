//! Logging infrastructure for the logseal binary.
//!
//! Writes to both the console and a daily-rotating file in the platform data
//! directory. Initialize once at startup, then use the `tracing` macros
//! throughout:
//!
//! ```no_run
//! logseal::logging::init().expect("Failed to initialize logging");
//! tracing::info!("starting verify pass");
//! ```

use anyhow::{Context as _, Result};
use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    EnvFilter, Layer as _, fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _,
};

/// Gets the log directory path based on platform conventions.
///
/// Returns:
/// - Windows: `%APPDATA%/logseal/logs`
/// - macOS: `~/Library/Application Support/logseal/logs`
/// - Linux: `~/.local/share/logseal/logs`
pub fn get_log_dir() -> Result<PathBuf> {
    let base_dir = dirs::data_dir().context("Failed to determine data directory")?;

    let log_dir = base_dir.join("logseal").join("logs");

    if !log_dir.exists() {
        std::fs::create_dir_all(&log_dir)
            .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;
    }

    Ok(log_dir)
}

/// Initializes the logging system with console and file output.
///
/// The file log rotates daily and keeps 10 old files. The default level is
/// INFO; override with `RUST_LOG`.
///
/// # Errors
///
/// Returns error if the log directory cannot be created or the file appender
/// fails to build.
pub fn init() -> Result<()> {
    let log_dir = get_log_dir()?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .max_log_files(10)
        .filename_prefix("logseal")
        .filename_suffix("log")
        .build(&log_dir)
        .context("Failed to create file appender")?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .context("Failed to create env filter")?;

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr)
        .without_time();

    let file_layer = fmt::layer()
        .with_target(true)
        .with_ansi(false)
        .with_writer(file_appender);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer.with_filter(tracing_subscriber::filter::LevelFilter::WARN))
        .with(file_layer)
        .try_init()
        .context("Failed to initialize tracing subscriber")?;

    Ok(())
}
