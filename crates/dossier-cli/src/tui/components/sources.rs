//! Deduplicated source list component.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, List, ListItem},
};

use crate::tui::app::App;

/// Render the grounding source list.
pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let sources = app.session.sources();

    let block = Block::default()
        .title(format!(" Sources ({}) ", sources.len()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::DarkGray));

    let inner_area = block.inner(area);
    frame.render_widget(block, area);

    if sources.is_empty() {
        let empty = ListItem::new(Line::from(Span::styled(
            " No sources yet",
            Style::default().fg(Color::DarkGray),
        )));
        frame.render_widget(List::new(vec![empty]), inner_area);
        return;
    }

    let visible_height = inner_area.height as usize;

    let items: Vec<ListItem> = sources
        .iter()
        .enumerate()
        .map(|(i, citation)| {
            let title = if citation.title.is_empty() {
                citation.uri.as_str()
            } else {
                citation.title.as_str()
            };

            let line = Line::from(vec![
                Span::styled(
                    format!(" {}. ", i + 1),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(title, Style::default().fg(Color::White)),
                Span::styled(
                    format!(" ({})", citation.hostname()),
                    Style::default().fg(Color::Blue),
                ),
            ]);

            ListItem::new(line)
        })
        .take(visible_height)
        .collect();

    let list = List::new(items);
    frame.render_widget(list, inner_area);
}
