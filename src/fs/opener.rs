//! Hand files over to the host's default application.

use std::fs;
use std::path::Path;
use std::process::{Command, Stdio};

use tracing::{debug, warn};

use crate::error::OpenError;

/// Something that can open a file outside the TUI.
///
/// Implementations wait for the launcher to report success or failure but
/// not for the launched application to exit.
pub trait FileOpener {
    fn open(&self, path: &Path) -> Result<(), OpenError>;
}

const NO_ARGS: &[&str] = &[];
const WINDOWS_ARGS: &[&str] = &["url.dll,FileProtocolHandler"];

/// Launcher program and leading arguments for an operating system name as
/// reported by `std::env::consts::OS`.
pub fn launcher_for(os: &str) -> Option<(&'static str, &'static [&'static str])> {
    match os {
        "macos" => Some(("open", NO_ARGS)),
        "windows" => Some(("rundll32", WINDOWS_ARGS)),
        "linux" | "freebsd" | "openbsd" | "netbsd" | "dragonfly" => Some(("xdg-open", NO_ARGS)),
        _ => None,
    }
}

/// Opens files with the platform's registered default application.
#[derive(Debug, Clone)]
pub struct SystemOpener {
    os: String,
}

impl SystemOpener {
    pub fn new() -> Self {
        Self::for_os(std::env::consts::OS)
    }

    /// An opener that behaves as it would on `os`.
    pub fn for_os(os: &str) -> Self {
        Self { os: os.to_string() }
    }
}

impl Default for SystemOpener {
    fn default() -> Self {
        Self::new()
    }
}

impl FileOpener for SystemOpener {
    fn open(&self, path: &Path) -> Result<(), OpenError> {
        let (program, args) = launcher_for(&self.os)
            .ok_or_else(|| OpenError::UnsupportedPlatform(self.os.clone()))?;
        fs::metadata(path)?;
        run(program, args.iter().copied(), path)
    }
}

/// Opens files with a user-configured command; the path is appended as the
/// last argument.
#[derive(Debug, Clone)]
pub struct CommandOpener {
    program: String,
    args: Vec<String>,
}

impl CommandOpener {
    /// Build from a `[program, args...]` list. Returns `None` when empty.
    pub fn from_argv(argv: &[String]) -> Option<Self> {
        let (program, args) = argv.split_first()?;
        Some(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }
}

impl FileOpener for CommandOpener {
    fn open(&self, path: &Path) -> Result<(), OpenError> {
        fs::metadata(path)?;
        run(&self.program, self.args.iter().map(String::as_str), path)
    }
}

fn run<'a>(
    program: &str,
    args: impl IntoIterator<Item = &'a str>,
    path: &Path,
) -> Result<(), OpenError> {
    debug!(program, path = %path.display(), "opening file");
    let status = Command::new(program)
        .args(args)
        .arg(path)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map_err(|source| OpenError::Spawn {
            program: program.to_string(),
            source,
        })?;

    if status.success() {
        Ok(())
    } else {
        warn!(program, %status, path = %path.display(), "launcher reported failure");
        Err(OpenError::Failed {
            program: program.to_string(),
            status,
        })
    }
}

/// One-line status text for a failed open.
pub fn format_open_error(path: &Path, err: &OpenError) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned());
    format!("Error opening {}: {}", name, err)
}
