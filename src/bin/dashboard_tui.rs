//! Trading Bot Dashboard - Terminal UI for monitoring a live trading bot
//!
//! Connects to the bot's WebSocket feed and renders:
//! - Status, round and stake ladder
//! - Win/loss sequence
//! - Trade history, balance chart and log feed
//!
//! Usage: `dashboard-tui [config_path]`

use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{error, info};

use bot_dashboard::bin_common::{load_config_from_env, parse_args, ConfigType};
use dashboard::application::visualizer::{ui, App};
use dashboard::infrastructure::init_file_tracing;
use dashboard::DashboardConfig;

/// How long to wait for input each frame
const FRAME_POLL_INTERVAL: Duration = Duration::from_millis(50);

fn main() -> Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    let config_type = ConfigType::from_args(&parse_args());
    let config_path = load_config_from_env(config_type);
    let config = DashboardConfig::load_or_default(&config_path)?;

    // Traces go to a file; stdout belongs to the alternate screen
    init_file_tracing(&config.log_file, &config.log_level)?;
    info!("[Dashboard] Starting with config {}", config_path.display());
    config.log();

    // Create tokio runtime
    let runtime = tokio::runtime::Runtime::new()?;

    // Initialize the app (starts connecting to the bot)
    let mut app = runtime.block_on(async {
        App::initialize(runtime.handle().clone(), &config).await
    })?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the main loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Shutdown app
    if let Err(e) = app.shutdown() {
        error!("[Dashboard] Shutdown error: {}", e);
    }

    if let Err(e) = result {
        error!("[Dashboard] {}", e);
        eprintln!("Error: {}", e);
    }

    info!("[Dashboard] Stopped");
    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        // Apply feed and connection events, then draw
        app.tick();
        terminal.draw(|frame| ui::draw(frame, app))?;

        if event::poll(FRAME_POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events (not release)
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key.code);
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
