//! Flapboard Entry Point
//!
//! Launches a split-flap board in the terminal.
//!
//! Usage:
//!   flapboard [OPTIONS] [MESSAGE]...
//!
//! Messages may contain `\n` for a line break; `{red}` style markers place
//! color flaps. Keys: `n` next message, `l` toggle loading, `b` toggle board
//! finish, `s` cycle tile size, `q`/`Esc`/`Ctrl-C` quit.
//!
//! Set `FLAPBOARD_LOG=/path/to/file` to write logs (filtered by `RUST_LOG`).

use std::fs::File;
use std::io;
use std::panic;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::info;

use flapboard_core::{BoardConfig, BoardType, FlapEngine, GeometryPreset, TileSize};
use flapboard_tui::{App, MessageDeck};

/// Split-flap board in the terminal
#[derive(Parser, Debug)]
#[command(name = "flapboard")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Messages to cycle through (`\n` for a line break)
    #[arg(value_name = "MESSAGE")]
    messages: Vec<String>,

    /// Configuration file path
    #[arg(short = 'c', long, env = "FLAPBOARD_CONFIG", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Board dimensions (flagship or note)
    #[arg(short = 'g', long)]
    geometry: Option<GeometryPreset>,

    /// Board finish (black or white)
    #[arg(short = 'b', long)]
    board_type: Option<BoardType>,

    /// Tile size (sm, md or lg)
    #[arg(short = 's', long)]
    size: Option<TileSize>,

    /// Start in the loading state
    #[arg(short = 'l', long)]
    loading: bool,

    /// Log file (logging is off without it)
    #[arg(long, env = "FLAPBOARD_LOG", value_name = "FILE")]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        init_logging(path)?;
    }

    let mut config = match &args.config {
        Some(path) => BoardConfig::load_from_file(path),
        None => BoardConfig::load(),
    }
    .context("Failed to load configuration")?;

    // Command line beats environment and file
    if let Some(geometry) = args.geometry {
        config.board.geometry = geometry;
    }
    let board_type = args.board_type.unwrap_or(config.board.board_type);
    let size = args.size.unwrap_or(config.board.size);

    let engine = FlapEngine::new(config.engine_config()?).context("Invalid board settings")?;
    info!(source = %config.source(), "Configuration loaded");

    let mut app = App::new(engine, MessageDeck::from_args(&args.messages))
        .with_visuals(board_type, size)
        .with_loading(args.loading);

    // Check if we have a TTY before attempting initialization
    use std::io::IsTerminal;

    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        eprintln!("Error: flapboard requires a terminal (TTY)");
        std::process::exit(1);
    }

    // Set up panic hook to restore terminal
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Run the app
    let result = app.run(&mut terminal).await;
    app.shutdown();

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Propagate any errors
    result
}

/// Write logs to a file so the alternate screen stays clean
fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;

    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new("flapboard_core=info,flapboard_tui=info")
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .init();

    Ok(())
}
