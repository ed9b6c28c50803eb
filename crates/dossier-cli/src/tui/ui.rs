//! UI rendering for the TUI.

use ratatui::{prelude::*, widgets::Paragraph};

use super::app::{App, InputMode};
use super::components::{artifact, chat, input, sources};

/// Render the entire UI.
pub fn render(app: &App, frame: &mut Frame) {
    let area = frame.area();

    // Main layout: content, input, status
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(10),   // Main content
            Constraint::Length(3), // Input
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    render_main_content(app, frame, chunks[0]);

    // Render input
    input::render(app, frame, chunks[1]);

    // Render status bar
    render_status_bar(app, frame, chunks[2]);
}

/// Render the main content area: chat beside the document and its sources,
/// or chat alone when the document panel is hidden.
fn render_main_content(app: &App, frame: &mut Frame, area: Rect) {
    if !app.panel.artifact_open {
        chat::render(app, frame, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(40), // Chat
            Constraint::Percentage(60), // Document + sources
        ])
        .split(area);

    chat::render(app, frame, chunks[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(8),    // Document
            Constraint::Length(7), // Sources
        ])
        .split(chunks[1]);

    artifact::render(app, frame, right[0]);
    sources::render(app, frame, right[1]);
}

/// Render the status bar.
fn render_status_bar(app: &App, frame: &mut Frame, area: Rect) {
    let left = if app.session.is_researching() {
        format!("Researching... {}", app.loading_message())
    } else if let Some(ref notice) = app.status_message {
        notice.clone()
    } else {
        match app.input_mode {
            InputMode::Normal => {
                "[i] Type  [d] Toggle document  [y] Copy  [j/k] Scroll  [q] Quit".to_string()
            }
            InputMode::Editing => "[Enter] Send  [Shift+Enter] Newline  [Esc] Cancel".to_string(),
        }
    };

    let status = format!("{}  |  {}", left, app.current_model());

    let status_bar = Paragraph::new(status).style(Style::default().fg(Color::DarkGray));

    frame.render_widget(status_bar, area);
}
