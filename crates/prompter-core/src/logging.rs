//! Logging configuration using tracing

use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::Result;

/// Environment variable holding the log filter
pub const LOG_ENV: &str = "PROMPTER_LOG";

/// Filter used when `PROMPTER_LOG` is unset or invalid
pub const DEFAULT_FILTER: &str = "prompter=info,prompter_app=info,warn";

/// Initialize the logging subsystem
///
/// Logs are written to `~/.local/share/prompter/logs/` because the terminal
/// (or stdout, in headless mode) belongs to the display.
/// Log level is controlled by the `PROMPTER_LOG` environment variable.
///
/// # Examples
/// ```bash
/// PROMPTER_LOG=debug prompter
/// PROMPTER_LOG=prompter_app=trace prompter --headless
/// ```
pub fn init() -> Result<()> {
    let log_dir = get_log_directory()?;
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, "prompter.log");

    // Default to info, allow override via PROMPTER_LOG
    let env_filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true)
                .with_timer(fmt::time::ChronoLocal::new(
                    "%Y-%m-%d %H:%M:%S%.3f".to_string(),
                )),
        )
        .init();

    tracing::info!("═══════════════════════════════════════════════════════");
    tracing::info!("prompter starting");
    tracing::info!("Log directory: {}", log_dir.display());
    tracing::info!("═══════════════════════════════════════════════════════");

    Ok(())
}

/// Get the log directory path
fn get_log_directory() -> Result<PathBuf> {
    let base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    Ok(base.join("prompter").join("logs"))
}

/// Get the log file path prefix for the rolling appender
pub fn get_current_log_file() -> Result<PathBuf> {
    let dir = get_log_directory()?;
    Ok(dir.join("prompter.log"))
}
