//! Logs panel component
//!
//! Displays the newest system log entries, color-coded by level. Logs
//! auto-follow; the panel is display only and never takes focus.

use super::scrollbar::{render_scrollbar, ScrollbarStyle};
use crate::logging::{LogEntry, LogLevel};
use crate::theme::Theme;
use crate::tui::scroll::ScrollState;
use crate::tui::traits::{Component, ComponentId, RenderContext, Scrollable};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

pub struct LogsPanel {
    scroll: ScrollState,
}

impl LogsPanel {
    pub fn new() -> Self {
        Self {
            scroll: ScrollState::new(), // Auto-follow by default
        }
    }
}

impl Default for LogsPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for LogsPanel {
    fn id(&self) -> ComponentId {
        ComponentId::Logs
    }

    fn render(&mut self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let entries = ctx.logs;
        self.scroll
            .update_dimensions(entries.len(), area.height.saturating_sub(2) as usize);

        let (start, end) = self.scroll.visible_range();
        let items: Vec<ListItem> = entries[start..end]
            .iter()
            .map(|entry| {
                ListItem::new(format_log_entry(entry))
                    .style(log_level_style(&entry.level, ctx.theme))
            })
            .collect();

        let list = List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(ctx.theme.border_type)
                .border_style(Style::default().fg(ctx.theme.panel_logs))
                .title(" System Logs "),
        );

        f.render_widget(list, area);
        render_scrollbar(f, area, &self.scroll, ScrollbarStyle::Arrows);
    }
}

impl Scrollable for LogsPanel {
    fn scroll_state_mut(&mut self) -> &mut ScrollState {
        &mut self.scroll
    }
}

fn format_log_entry(entry: &LogEntry) -> String {
    format!(
        "[{}] {:5} {}: {}",
        entry.timestamp.format("%H:%M:%S"),
        entry.level.as_str(),
        entry.module(),
        entry.message
    )
}

fn log_level_style(level: &LogLevel, theme: &Theme) -> Style {
    match level {
        LogLevel::Error => Style::default()
            .fg(theme.error)
            .add_modifier(Modifier::BOLD),
        LogLevel::Warn => Style::default().fg(theme.warn),
        LogLevel::Info => Style::default().fg(theme.info),
        LogLevel::Debug | LogLevel::Trace => Style::default().fg(theme.muted),
    }
}
