//! Tracing subscriber setup.
//!
//! The TUI owns stdout, so log output goes to a file. Filtering follows
//! `RUST_LOG` and defaults to `info`.

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::error::{AppError, Result};

/// Install the global subscriber writing to `log_file_path`.
pub fn init(log_file_path: &Path) -> Result<()> {
    let log_file = File::create(log_file_path)?;
    build_subscriber(log_file, EnvFilter::try_from_default_env().ok())
        .try_init()
        .map_err(|e| AppError::Config(format!("failed to install logger: {}", e)))
}

/// Build a file-backed subscriber. `filter` defaults to `info`.
pub fn build_subscriber(
    log_file: File,
    filter: Option<EnvFilter>,
) -> impl tracing::Subscriber + Send + Sync {
    let env_filter = filter.unwrap_or_else(|| EnvFilter::new("info"));
    let fmt_layer = fmt::layer()
        .with_writer(Arc::new(log_file))
        .with_ansi(false);

    tracing_subscriber::registry().with(fmt_layer).with(env_filter)
}
