// Views module - screen-level rendering
//
// Shell layout: title bar, content (book list + detail panel), system logs,
// status bar. Modals and toasts are drawn on top.

mod modal;

use super::app::App;
use super::components::{status_bar, title_bar};
use super::layout::Breakpoint;
use super::traits::{Component, RenderContext};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::Frame;

/// Number of log lines kept on screen
const LOG_LINES: usize = 200;

/// Main UI render function - called on every frame
pub fn draw(f: &mut Frame, app: &mut App) {
    let bg_block = Block::default().style(Style::default().bg(app.theme.background));
    f.render_widget(bg_block, f.area());

    let area = f.area();
    let bp = Breakpoint::from_width(area.width);
    let logs_height = if bp.at_least(Breakpoint::Normal) { 8 } else { 5 };

    let shell = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),           // Title
            Constraint::Min(10),             // Content
            Constraint::Length(logs_height), // Logs
            Constraint::Length(2),           // Status
        ])
        .split(area);

    title_bar::render(f, shell[0], app);

    let content = if bp.side_by_side() {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(bp.list_percent()),
                Constraint::Percentage(100 - bp.list_percent()),
            ])
            .split(shell[1])
    } else {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(shell[1])
    };

    let logs = app.log_buffer.recent(LOG_LINES);
    {
        // Split borrows: panels render mutably while the context reads the page
        let ctx = RenderContext {
            theme: &app.theme,
            focus: app.focus,
            page: &app.page,
            logs: &logs,
        };
        app.list_panel.render(f, content[0], &ctx);
        app.detail_panel.render(f, content[1], &ctx);
        app.logs_panel.render(f, shell[2], &ctx);
    }

    status_bar::render(f, shell[3], app);

    if let Some(modal_state) = &app.modal {
        modal::render(f, modal_state, app);
    }

    if let Some(toast) = &app.toast {
        toast.render(f, area, &app.theme);
    }

    app.clear_expired_toast();
}
