use std::process::ExitStatus;

use thiserror::Error;

/// Application-wide result type alias.
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// I/O errors from terminal or filesystem operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Terminal initialization or rendering errors.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Root directory given on the command line does not exist.
    #[error("Directory does not exist: {0}")]
    InvalidPath(String),

    /// Configuration or logging setup errors.
    #[error("Config error: {0}")]
    Config(String),
}

/// Failure to hand a file over to the host's default application.
#[derive(Debug, Error)]
pub enum OpenError {
    /// The file itself could not be inspected (usually missing).
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// No known default-open mechanism on this operating system.
    #[error("unsupported platform: {0}")]
    UnsupportedPlatform(String),

    /// The launcher could not be started.
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    /// The launcher ran but reported failure.
    #[error("{program} {status}")]
    Failed { program: String, status: ExitStatus },
}
