//! Application configuration: TOML file loading, CLI overrides, and defaults.
//!
//! Resolution order (first found wins, values merge/override):
//! 1. CLI flags (`--depth`, `--log-file`)
//! 2. Explicit `--config <file>`
//! 3. `$DTREE_CONFIG` environment variable (path to config file)
//! 4. Project-local `.dtree.toml` in the current working directory
//! 5. Global `~/.config/dtree/config.toml`
//! 6. Built-in defaults

use std::path::{Path, PathBuf};

use serde::Deserialize;

// ── Section configs ──────────────────────────────────────────────────────────

/// Tree settings.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct TreeConfig {
    /// Levels below the root expanded at startup.
    pub depth: Option<usize>,
}

/// How files are opened.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct OpenerConfig {
    /// Command used instead of the platform default, e.g. `["code", "-r"]`.
    /// The file path is appended as the last argument.
    pub command: Option<Vec<String>>,
}

/// Hex color overrides for the `custom` scheme.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ThemeColorsConfig {
    pub header_fg: Option<String>,
    pub dir_fg: Option<String>,
    pub file_fg: Option<String>,
    pub connector_fg: Option<String>,
    pub cursor_fg: Option<String>,
    pub legend_fg: Option<String>,
    pub error_fg: Option<String>,
}

/// Theme configuration section.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ThemeConfig {
    /// Color scheme: "dark", "light", "custom".
    pub scheme: Option<String>,
    /// Custom color overrides.
    pub custom: Option<ThemeColorsConfig>,
}

/// Logging settings.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct LogConfig {
    /// File receiving tracing output. Logging is off when unset.
    pub file: Option<PathBuf>,
}

// ── Top-level config ─────────────────────────────────────────────────────────

/// Top-level application configuration.
///
/// All fields are optional so that partial configs from different sources
/// can be merged together (CLI overrides file, file overrides defaults).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub tree: TreeConfig,
    pub opener: OpenerConfig,
    pub theme: ThemeConfig,
    pub log: LogConfig,
}

/// Default number of levels expanded at startup.
pub const DEFAULT_DEPTH: usize = 1;

// ── Config file locator ──────────────────────────────────────────────────────

/// Candidate config files, highest priority first. The `--config` path is
/// handled separately.
fn candidate_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Ok(env_path) = std::env::var("DTREE_CONFIG") {
        paths.push(PathBuf::from(env_path));
    }

    if let Ok(cwd) = std::env::current_dir() {
        paths.push(cwd.join(".dtree.toml"));
    }

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("dtree").join("config.toml"));
    }

    paths
}

/// Try to read and parse a TOML config file. Returns `None` if the file
/// doesn't exist or can't be parsed (with a warning printed to stderr).
fn load_file(path: &Path) -> Option<AppConfig> {
    let content = std::fs::read_to_string(path).ok()?;
    match toml::from_str::<AppConfig>(&content) {
        Ok(cfg) => Some(cfg),
        Err(e) => {
            eprintln!(
                "Warning: failed to parse config file {}: {}",
                path.display(),
                e
            );
            None
        }
    }
}

// ── Merge logic ──────────────────────────────────────────────────────────────

impl AppConfig {
    /// Merge `other` on top of `self`; `other`'s `Some` values win.
    pub fn merge(self, other: &AppConfig) -> AppConfig {
        AppConfig {
            tree: TreeConfig {
                depth: other.tree.depth.or(self.tree.depth),
            },
            opener: OpenerConfig {
                command: other.opener.command.clone().or(self.opener.command),
            },
            theme: ThemeConfig {
                scheme: other.theme.scheme.clone().or(self.theme.scheme),
                custom: other.theme.custom.clone().or(self.theme.custom),
            },
            log: LogConfig {
                file: other.log.file.clone().or(self.log.file),
            },
        }
    }

    /// Load the final merged configuration.
    ///
    /// `cli_config_path` is an explicit config file path from `--config`.
    /// `cli_overrides` are partial overrides derived from CLI flags.
    pub fn load(cli_config_path: Option<&Path>, cli_overrides: Option<&AppConfig>) -> AppConfig {
        let mut config = AppConfig::default();

        // Lowest priority first so higher-priority files overwrite.
        for path in candidate_paths().iter().rev() {
            if let Some(file_cfg) = load_file(path) {
                config = config.merge(&file_cfg);
            }
        }

        if let Some(cli_path) = cli_config_path {
            match load_file(cli_path) {
                Some(file_cfg) => config = config.merge(&file_cfg),
                None if !cli_path.exists() => {
                    eprintln!("Warning: config file {} not found", cli_path.display());
                }
                None => {}
            }
        }

        if let Some(overrides) = cli_overrides {
            config = config.merge(overrides);
        }

        config
    }

    // ── Convenience getters with built-in defaults ──────────────────────────

    /// Levels expanded at startup.
    pub fn depth(&self) -> usize {
        self.tree.depth.unwrap_or(DEFAULT_DEPTH)
    }

    /// Custom open command, if a non-empty one is configured.
    pub fn open_command(&self) -> Option<&[String]> {
        self.opener
            .command
            .as_deref()
            .filter(|argv| !argv.is_empty())
    }

    pub fn log_file(&self) -> Option<&Path> {
        self.log.file.as_deref()
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
