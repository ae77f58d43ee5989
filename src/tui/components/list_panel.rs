//! Book list component
//!
//! One entry per book, in the order the backend returned them. The cursor
//! moves with the keyboard; Enter/Space or a click selects the entry, which
//! the App turns into "show this book's panel".

use super::scrollbar::{render_scrollbar, ScrollbarStyle};
use super::{hit, inner};
use crate::tui::scroll::ScrollState;
use crate::tui::traits::{
    Component, ComponentId, Handled, Interactive, RenderContext, Scrollable, Selectable,
};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

pub struct ListPanel {
    /// Manual scroll, follows the cursor
    scroll: ScrollState,

    /// Cursor index (None while the list is empty)
    cursor: Option<usize>,

    /// Number of entries at last sync
    count: usize,

    /// Area of the last render, for mouse hit-testing
    area: Rect,
}

impl ListPanel {
    pub fn new() -> Self {
        Self {
            scroll: ScrollState::manual(),
            cursor: None,
            count: 0,
            area: Rect::default(),
        }
    }

    /// Sync with the number of list entries on the page
    pub fn set_count(&mut self, count: usize) {
        self.count = count;
        self.cursor = match (self.cursor, count) {
            (_, 0) => None,
            (Some(idx), n) => Some(idx.min(n - 1)),
            (None, _) => Some(0),
        };
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Entry index under a terminal cell, if any
    pub fn entry_at(&self, column: u16, row: u16) -> Option<usize> {
        let rows = inner(self.area);
        if !hit(rows, column, row) {
            return None;
        }
        let idx = self.scroll.offset() + (row - rows.y) as usize;
        (idx < self.count).then_some(idx)
    }

    fn move_cursor_by(&mut self, delta: isize) {
        if self.count == 0 {
            return;
        }
        let current = self.cursor.unwrap_or(0) as isize;
        let target = (current + delta).clamp(0, self.count as isize - 1);
        self.select(target as usize);
    }
}

impl Default for ListPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for ListPanel {
    fn id(&self) -> ComponentId {
        ComponentId::List
    }

    fn render(&mut self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let theme = ctx.theme;
        let focused = ctx.is_focused(self.id());
        let entries = ctx.page.list_entries();

        self.area = area;
        self.set_count(entries.len());
        self.scroll
            .update_dimensions(entries.len(), area.height.saturating_sub(2) as usize);
        if let Some(cursor) = self.cursor {
            self.scroll.ensure_visible(cursor);
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(theme.panel_border(self.id(), focused)))
            .title(format!(" Books ({}) ", entries.len()));

        if ctx.page.is_empty() {
            let empty = Paragraph::new("No books")
                .style(Style::default().fg(theme.muted))
                .block(block);
            f.render_widget(empty, area);
            return;
        }

        let open = ctx.page.visible_panel().map(|p| p.book_id);
        let (start, end) = self.scroll.visible_range();

        let items: Vec<ListItem> = entries[start..end]
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let marker = if open == Some(entry.book_id) { "▸ " } else { "  " };
                let style = if self.cursor == Some(start + i) {
                    let style = Style::default().add_modifier(Modifier::BOLD);
                    if focused {
                        style.fg(theme.selection_fg).bg(theme.selection)
                    } else {
                        style.fg(theme.highlight)
                    }
                } else {
                    Style::default().fg(theme.foreground)
                };
                ListItem::new(Line::from(vec![
                    Span::styled(marker, Style::default().fg(theme.highlight)),
                    Span::raw(entry.title.clone()),
                ]))
                .style(style)
            })
            .collect();

        f.render_widget(List::new(items).block(block), area);
        render_scrollbar(f, area, &self.scroll, ScrollbarStyle::Minimal);
    }
}

impl Scrollable for ListPanel {
    fn scroll_state_mut(&mut self) -> &mut ScrollState {
        &mut self.scroll
    }
}

impl Selectable for ListPanel {
    fn selected_index(&self) -> Option<usize> {
        self.cursor
    }

    fn select(&mut self, index: usize) {
        if self.count == 0 {
            return;
        }
        let index = index.min(self.count - 1);
        self.cursor = Some(index);
        self.scroll.ensure_visible(index);
    }

    fn item_count(&self) -> usize {
        self.count
    }
}

impl Interactive for ListPanel {
    fn handle_key(&mut self, key: KeyEvent) -> Handled {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.select_previous(),
            KeyCode::Down | KeyCode::Char('j') => self.select_next(),
            KeyCode::Home | KeyCode::Char('g') => self.select_first(),
            KeyCode::End | KeyCode::Char('G') => self.select_last(),
            KeyCode::PageUp => self.move_cursor_by(-(self.scroll.viewport().max(1) as isize)),
            KeyCode::PageDown => self.move_cursor_by(self.scroll.viewport().max(1) as isize),
            _ => return Handled::No,
        }
        Handled::Yes
    }

    fn focus_hint(&self) -> Option<&'static str> {
        Some("↑↓:move  Enter:open")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn cursor_starts_at_first_entry() {
        let mut panel = ListPanel::new();
        assert_eq!(panel.cursor(), None);
        panel.set_count(3);
        assert_eq!(panel.cursor(), Some(0));
    }

    #[test]
    fn cursor_is_clamped_to_entries() {
        let mut panel = ListPanel::new();
        panel.set_count(3);
        panel.handle_key(key(KeyCode::Char('G')));
        assert_eq!(panel.cursor(), Some(2));

        panel.handle_key(key(KeyCode::Down));
        assert_eq!(panel.cursor(), Some(2));

        panel.handle_key(key(KeyCode::Char('g')));
        panel.handle_key(key(KeyCode::Up));
        assert_eq!(panel.cursor(), Some(0));
    }

    #[test]
    fn unknown_keys_bubble_up() {
        let mut panel = ListPanel::new();
        panel.set_count(2);
        assert_eq!(panel.handle_key(key(KeyCode::Char('x'))), Handled::No);
        assert_eq!(panel.handle_key(key(KeyCode::Char('j'))), Handled::Yes);
    }

    #[test]
    fn entry_at_maps_rows_inside_border() {
        let mut panel = ListPanel::new();
        panel.set_count(2);
        panel.area = Rect::new(0, 0, 20, 10);

        assert_eq!(panel.entry_at(3, 0), None); // Border
        assert_eq!(panel.entry_at(3, 1), Some(0));
        assert_eq!(panel.entry_at(3, 2), Some(1));
        assert_eq!(panel.entry_at(3, 3), None); // Past the last entry
    }
}
