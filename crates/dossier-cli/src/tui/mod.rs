//! TUI chat interface for Dossier.
//!
//! Provides an interactive terminal UI with:
//! - Chat thread for topics and status messages
//! - Live research document panel with show/hide and copy
//! - Deduplicated source list
//! - Streaming report responses

mod app;
mod components;
mod event;
mod ui;

use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::io::stdout;

use app::App;
use dossier_core::{Config, GeminiClient};

/// Run the TUI application.
pub async fn run(config: Config) -> Result<()> {
    // Fail on a missing API key before touching the terminal.
    let provider = Arc::new(GeminiClient::from_config(&config)?);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app state
    let mut app = App::new(config, provider);

    // Run the main loop
    let result = app.run(&mut terminal).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}
