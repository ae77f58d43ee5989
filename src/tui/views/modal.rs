// Modal overlay rendering

use crate::tui::app::App;
use crate::tui::modal::Modal;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Render a modal dialog as a centered overlay
pub fn render(f: &mut Frame, modal: &Modal, app: &App) {
    match modal {
        Modal::Help => render_help(f, app),
    }
}

/// Calculate centered rect for modal dialog
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

fn render_help(f: &mut Frame, app: &App) {
    let key_style = Style::default().fg(app.theme.title);
    let desc_style = Style::default().fg(app.theme.foreground);
    let header_style = Style::default()
        .fg(app.theme.highlight)
        .add_modifier(Modifier::BOLD);
    let divider_style = Style::default().fg(app.theme.border);

    // "    key         description"
    let kb = |key: &str, desc: &str| -> Line {
        Line::from(vec![
            Span::raw("    "),
            Span::styled(format!("{:<14}", key), key_style),
            Span::styled(desc.to_string(), desc_style),
        ])
    };

    let content = Text::from(vec![
        Line::raw(""),
        Line::from(Span::styled("  Book list", header_style)),
        kb("↑/↓, j/k", "Move cursor"),
        kb("g/G", "First / last book"),
        kb("Enter, Space", "Show book details"),
        Line::raw(""),
        Line::from(Span::styled("  Book details", header_style)),
        kb("l, Enter", "Like Book"),
        kb("↑/↓, j/k", "Scroll likers"),
        Line::raw(""),
        Line::from(Span::styled("  General", header_style)),
        kb("Tab, ←/→", "Switch panel"),
        kb("?", "Toggle this help"),
        kb("q", "Quit"),
        Line::raw(""),
        Line::from(Span::styled("  Mouse", header_style)),
        kb("Click book", "Show book details"),
        kb("Click button", "Like Book"),
        kb("Scroll", "Move in focused panel"),
        Line::raw(""),
        Line::from(Span::styled(
            "  ──────────────────────────────────",
            divider_style,
        )),
        Line::from(vec![
            Span::styled("  Theme: ", desc_style),
            Span::styled(app.theme.name.as_str(), key_style),
            Span::styled("  |  Likes: ", desc_style),
            Span::styled(app.like_mode().as_str(), key_style),
        ]),
    ]);

    let area = centered_rect(46, 27, f.area());
    f.render_widget(Clear, area);

    let paragraph = Paragraph::new(content)
        .style(Style::default().bg(app.theme.background))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.highlight))
                .border_type(app.theme.border_type)
                .title(" Help ")
                .title_bottom(Line::from(" Press ? or Esc to close ").centered()),
        );

    f.render_widget(paragraph, area);
}
