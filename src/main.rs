// stagetty: terminal front end for a multi-stage compiler service

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;
use tracing_subscriber::EnvFilter;

use stagetty::client::CompileClient;
use stagetty::config::Config;
use stagetty::ui::App;
use stagetty::view::{TabId, ViewState};

#[derive(Parser, Debug)]
#[command(name = "stagetty")]
#[command(about = "Browse every stage of a compile in the terminal")]
struct Args {
    /// Source file to open in the editor
    file: Option<PathBuf>,

    /// Base URL of the compiler service
    #[arg(long)]
    server: Option<String>,

    /// JSON config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write logs to this file (filter with RUST_LOG)
    #[arg(long)]
    log: Option<PathBuf>,

    /// Tab to show first
    #[arg(long)]
    tab: Option<TabId>,
}

/// Log to a file; the terminal belongs to the UI
fn init_logging(path: &Path) -> io::Result<()> {
    let file = fs::OpenOptions::new().create(true).append(true).open(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("stagetty=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if let Some(path) = &args.log {
        if let Err(e) = init_logging(path) {
            eprintln!("Error: cannot open log file '{}': {}", path.display(), e);
            std::process::exit(1);
        }
    }

    let mut config = match &args.config {
        Some(path) => match Config::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },
        None => Config::default(),
    };
    if let Some(server) = args.server {
        config.server_url = server;
    }
    if let Some(tab) = args.tab {
        config.initial_tab = tab;
    }

    let mut view = ViewState::new(config.placeholders.clone(), config.initial_tab);

    if let Some(file) = &args.file {
        match fs::read_to_string(file) {
            Ok(source) => view.source.replace(source),
            Err(e) => {
                eprintln!("Error: cannot read '{}': {}", file.display(), e);
                std::process::exit(1);
            }
        }
    }

    info!(server = %config.server_url, "starting");
    let client = CompileClient::connect(&config.server_url, config.connect_timeout());

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(view, client, config.server_url.clone(), config.examples.clone());
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}
