//! Research document panel.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use crate::tui::app::App;

/// Render the document panel.
pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let copied = app.panel.copy_flash_active();

    let title = if copied {
        " Document (copied) "
    } else {
        " Document "
    };

    let border_style = if copied {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_style);

    let inner_area = block.inner(area);

    let mut content = app.session.artifact().as_str().to_string();
    if app.session.is_researching() {
        // Live cursor at the end of the streaming text
        content.push('▌');
    } else if content.is_empty() {
        content = "The research document will appear here.".to_string();
    }

    // Keep the tail visible while the stream grows. Line count ignores
    // soft-wrapping, which is close enough for a follow-the-tail scroll.
    let total_lines = content.lines().count();
    let scroll = total_lines.saturating_sub(inner_area.height as usize) as u16;

    let style = if app.session.artifact().is_empty() && !app.session.is_researching() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::White)
    };

    let paragraph = Paragraph::new(content)
        .style(style)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0))
        .block(block);

    frame.render_widget(paragraph, area);
}
