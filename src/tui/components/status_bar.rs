// Status bar component
//
// Renders session info at the bottom: who is liking, how likes are sent,
// which backend, and the focused panel's key hints.

use crate::tui::app::App;
use crate::tui::layout::Breakpoint;
use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the status bar
///
/// Adapts to terminal width:
/// - Wide: user, like mode, backend URL and key hints
/// - Narrow: user and key hints only
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let bp = Breakpoint::from_width(area.width);

    let user = match &app.user {
        Some(user) => format!("👤 {} ({})", user.username, user.id),
        None => format!("👤 user {} (unresolved)", app.session_user_id()),
    };
    let hint = app.focus_hint().unwrap_or("");

    let status_text = if bp.at_least(Breakpoint::Wide) {
        format!(
            " {} │ mode: {} │ {} │ {}",
            user,
            app.like_mode().as_str(),
            app.api_url,
            hint
        )
    } else {
        format!(" {} │ {}", user, hint)
    };

    let status = Paragraph::new(status_text)
        .style(Style::default().fg(app.theme.status_bar))
        .block(Block::default().borders(Borders::TOP));

    f.render_widget(status, area);
}
