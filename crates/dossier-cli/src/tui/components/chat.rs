//! Chat message display component.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, List, ListItem},
};

use dossier_core::Role;

use crate::tui::app::App;

/// Display label for a message role.
fn role_label(role: Role) -> &'static str {
    match role {
        Role::User => "You",
        Role::Ai => "Dossier",
        Role::System => "System",
    }
}

/// Render the chat message list.
pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(" Research Chat ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::DarkGray));

    let inner_area = block.inner(area);
    frame.render_widget(block, area);

    // Build message items
    let items: Vec<ListItem> = app
        .session
        .messages()
        .iter()
        .map(|msg| {
            let (prefix_style, content_style) = match msg.role {
                Role::User => (
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                    Style::default().fg(Color::White),
                ),
                Role::Ai => (
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                    Style::default().fg(Color::White),
                ),
                Role::System => (
                    Style::default().fg(Color::Yellow),
                    Style::default().fg(Color::DarkGray),
                ),
            };

            let stamp = msg.timestamp.format("%H:%M");
            let prefix = format!("{} [{}] ", stamp, role_label(msg.role));

            // Wrap long messages
            let lines: Vec<Line> = msg
                .content
                .lines()
                .enumerate()
                .map(|(i, line)| {
                    if i == 0 {
                        Line::from(vec![
                            Span::styled(prefix.clone(), prefix_style),
                            Span::styled(line, content_style),
                        ])
                    } else {
                        Line::from(vec![
                            Span::raw("      "), // Indent continuation
                            Span::styled(line, content_style),
                        ])
                    }
                })
                .collect();

            ListItem::new(lines)
        })
        .collect();

    // Calculate scroll position
    let visible_height = inner_area.height as usize;
    let total_items = items.len();

    // Auto-scroll to bottom unless user has scrolled up
    let start_index = if app.scroll_offset > 0 {
        total_items.saturating_sub(visible_height + app.scroll_offset)
    } else {
        total_items.saturating_sub(visible_height)
    };

    let visible_items: Vec<ListItem> = items
        .into_iter()
        .skip(start_index)
        .take(visible_height)
        .collect();

    let list = List::new(visible_items);
    frame.render_widget(list, inner_area);
}
