// Title bar component
//
// Renders the app title with a loading indicator and the book count.

use crate::tui::app::{App, LoadState};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let state = match &app.load_state {
        LoadState::Loading => format!(" {} loading books", app.spinner_char()),
        LoadState::Ready => format!(" ──── {} books", app.page.list_entries().len()),
        LoadState::Failed(_) => " ──── could not load books".to_string(),
    };

    let title = Paragraph::new(format!(" 📚 bookliker{}", state))
        .style(
            Style::default()
                .fg(app.theme.title)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(Style::default().fg(app.theme.title))
                .title_top(ratatui::text::Line::from(" ? ").right_aligned()),
        );

    f.render_widget(title, area);
}
