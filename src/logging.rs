//! Logging configuration and initialization for gdsearch.
//!
//! Logs go to stderr so the rendered message on stdout stays clean.

use std::fs::{self, File};
use std::path::Path;
use std::sync::Arc;

use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;
use crate::{Result, SearchError};

/// Parse log level string to tracing Level.
fn parse_level(level: &str) -> Level {
    match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" | "warning" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    }
}

fn filter_for(level: &str) -> EnvFilter {
    EnvFilter::from_default_env().add_directive(parse_level(level).into())
}

/// Initialize the logging system with the given configuration.
///
/// Writes to stderr, and also to `config.file` when one is set.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let Some(path) = config.file.as_deref() else {
        init_console_only(&config.level);
        return Ok(());
    };

    let filter = filter_for(&config.level);

    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let log_file = Arc::new(File::create(path)?);
    let writer = std::io::stderr.and(log_file);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true),
        )
        .with(filter)
        .try_init()
        .map_err(|e| SearchError::Config(format!("failed to install logger: {e}")))
}

/// Initialize stderr-only logging.
pub fn init_console_only(level: &str) {
    // A subscriber may already be installed (tests, embedding); keep it.
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true),
        )
        .with(filter_for(level))
        .try_init();
}
