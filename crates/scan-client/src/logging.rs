use std::io;
use std::path::Path;

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use crate::config::{LogRotation, LoggingConfig};

impl LogRotation {
    fn rotation(self) -> Rotation {
        match self {
            LogRotation::Minutely => Rotation::MINUTELY,
            LogRotation::Hourly => Rotation::HOURLY,
            LogRotation::Daily => Rotation::DAILY,
            LogRotation::Never => Rotation::NEVER,
        }
    }
}

fn file_appender(log_dir: &Path, config: &LoggingConfig) -> anyhow::Result<RollingFileAppender> {
    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("failed to create log dir {}", log_dir.display()))?;
    RollingFileAppender::builder()
        .rotation(config.rotation.rotation())
        .filename_prefix(&config.file_prefix)
        .build(log_dir)
        .with_context(|| format!("failed to open log file in {}", log_dir.display()))
}

/// `RUST_LOG` wins over the configured directives.
fn env_filter(config: &LoggingConfig) -> anyhow::Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&config.filter)
            .with_context(|| format!("invalid log filter {:?}", config.filter)),
    }
}

/// JSON lines to the rolling file in `log_dir`, plus plain stderr output
/// when the config or `force_stderr` asks for it. Keep the returned guard
/// alive until exit.
pub fn init_tracing(
    log_dir: &Path,
    config: &LoggingConfig,
    force_stderr: bool,
) -> anyhow::Result<WorkerGuard> {
    let (file_writer, file_guard) = tracing_appender::non_blocking(file_appender(log_dir, config)?);
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(file_writer)
        .with_target(false)
        .json();
    let stderr_layer = (config.to_stderr || force_stderr).then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(io::stderr)
            .with_target(false)
    });

    tracing_subscriber::registry()
        .with(env_filter(config)?)
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .context("tracing subscriber already installed")?;
    Ok(file_guard)
}
