//! Subscriber setup for applications embedding the client.
//!
//! The client itself only emits `tracing` events; installing a subscriber
//! is left to the caller, who can use [`init_logging`] to get the usual
//! rolling-file plus stdout arrangement.

use crate::config::LoggingConfig;
use crate::error::ConfigError;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Map the configured rotation name; unknown names disable rotation.
pub fn rotation_from_name(name: &str) -> Rotation {
    match name {
        "minutely" => Rotation::MINUTELY,
        "hourly" => Rotation::HOURLY,
        "daily" => Rotation::DAILY,
        _ => Rotation::NEVER,
    }
}

/// Install the global subscriber. Keep the returned guard alive for as long
/// as log lines should be flushed to the file appender.
///
/// `RUST_LOG` takes precedence over `log_level` when set.
pub fn init_logging(config: &LoggingConfig) -> Result<WorkerGuard, ConfigError> {
    let file_appender = RollingFileAppender::builder()
        .rotation(rotation_from_name(&config.rotation))
        .filename_prefix(config.log_file.as_str())
        .build(&config.log_dir)
        .map_err(|e| ConfigError::Logging(format!("{}: {}", config.log_dir, e)))?;
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .map_err(|e| ConfigError::Parse(format!("invalid log level: {}", e)))?;

    let registry = tracing_subscriber::registry().with(filter);

    let installed = if config.use_json {
        let file_layer = fmt::layer()
            .json()
            .with_target(true)
            .with_writer(non_blocking)
            .with_ansi(false);
        registry.with(file_layer).try_init()
    } else {
        let file_layer = fmt::layer()
            .with_target(false)
            .with_writer(non_blocking)
            .with_ansi(false);
        let stdout_layer = fmt::layer().with_target(false).with_ansi(true);
        registry.with(file_layer).with(stdout_layer).try_init()
    };

    installed.map_err(|e| ConfigError::Parse(format!("subscriber already installed: {}", e)))?;

    Ok(guard)
}
