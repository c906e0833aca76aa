mod app;
mod components;
mod config;
mod error;
mod event;
mod fs;
mod handler;
mod logging;
mod theme;
mod tui;
mod ui;
mod viewport;

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tracing::info;

use crate::app::App;
use crate::config::{AppConfig, LogConfig, TreeConfig};
use crate::error::AppError;
use crate::event::{Event, EventHandler};
use crate::fs::opener::{CommandOpener, FileOpener, SystemOpener};
use crate::theme::ThemeColors;
use crate::tui::{install_panic_hook, Tui};

const CONTROLS_HELP: &str = "\
Controls:
  ↑/↓ or j/k          Navigate up/down
  Ctrl+U/D            Jump half-screen up/down
  Ctrl+B/F            Jump full-screen up/down
  gg/G                Go to top/bottom
  Enter/Space         Expand/collapse directories
  Enter               Open files with default application
  q/Ctrl+C/Esc        Quit

Examples:
  dtree               # View current directory
  dtree /home/user    # View specific directory
  dtree -d 3 .        # Expand 3 levels deep";

/// Interactive directory tree viewer.
#[derive(Parser, Debug)]
#[command(name = "dtree", version, about, after_help = CONTROLS_HELP)]
struct Cli {
    /// Directory to view (defaults to current directory)
    directory: Option<PathBuf>,

    /// Initial depth to expand [default: 1]
    #[arg(short, long, value_name = "NUM")]
    depth: Option<usize>,

    /// Config file to load on top of the default locations
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write logs to this file
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,
}

impl Cli {
    /// Flags that override config file values.
    fn overrides(&self) -> AppConfig {
        AppConfig {
            tree: TreeConfig { depth: self.depth },
            log: LogConfig {
                file: self.log_file.clone(),
            },
            ..Default::default()
        }
    }
}

#[tokio::main]
async fn main() {
    if let Err(e) = run(Cli::parse()).await {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> error::Result<()> {
    let config = AppConfig::load(cli.config.as_deref(), Some(&cli.overrides()));

    let requested = match cli.directory {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };
    let root = requested
        .canonicalize()
        .map_err(|_| AppError::InvalidPath(requested.display().to_string()))?;

    if let Some(log_file) = config.log_file() {
        logging::init(log_file)?;
    }

    let opener: Box<dyn FileOpener> = match config.open_command().and_then(CommandOpener::from_argv)
    {
        Some(command) => Box::new(command),
        None => Box::new(SystemOpener::new()),
    };
    let theme = theme::resolve_theme(&config.theme);
    let mut app = App::new(&root, config.depth(), opener);

    install_panic_hook();
    let mut tui = Tui::new()?;
    let result = event_loop(&mut tui, &mut app, &theme).await;
    tui.restore()?;
    info!("session ended");
    result
}

async fn event_loop(tui: &mut Tui, app: &mut App, theme: &ThemeColors) -> error::Result<()> {
    let (width, height) = tui.size()?;
    app.resize(width, height);
    let mut events = EventHandler::new(Duration::from_millis(250));

    loop {
        tui.terminal_mut().draw(|frame| ui::render(app, theme, frame))?;

        match events.next().await? {
            Event::Key(key) => handler::handle_key_event(app, key),
            Event::Resize(width, height) => app.resize(width, height),
            Event::Tick => {}
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
