//! Detail panel component
//!
//! Draws the page's visible book panel: title, cover URL, description,
//! the liker list and the like button. Only one panel is visible at a time;
//! with none visible the component shows a hint instead.

use super::scrollbar::{render_scrollbar, ScrollbarStyle};
use super::{hit, inner};
use crate::models::BookId;
use crate::tui::scroll::ScrollState;
use crate::tui::traits::{Component, ComponentId, Handled, Interactive, RenderContext, Scrollable};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

pub struct DetailPanel {
    /// Liker list scroll (manual)
    scroll: ScrollState,

    /// Book whose panel was drawn last; scroll resets when it changes
    shown: Option<BookId>,

    /// Where the like button was drawn, for mouse hit-testing
    button_area: Option<Rect>,
}

impl DetailPanel {
    pub fn new() -> Self {
        Self {
            scroll: ScrollState::manual(),
            shown: None,
            button_area: None,
        }
    }

    /// Whether a click at (column, row) lands on the like button
    pub fn button_hit(&self, column: u16, row: u16) -> bool {
        self.button_area
            .is_some_and(|area| hit(area, column, row))
    }
}

impl Default for DetailPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for DetailPanel {
    fn id(&self) -> ComponentId {
        ComponentId::Detail
    }

    fn render(&mut self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let theme = ctx.theme;
        let focused = ctx.is_focused(self.id());
        let border = Style::default().fg(theme.panel_border(self.id(), focused));

        let Some(panel) = ctx.page.visible_panel() else {
            self.shown = None;
            self.button_area = None;
            let hint = Paragraph::new("Select a book to see its details")
                .style(Style::default().fg(theme.muted))
                .alignment(Alignment::Center)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_type(theme.border_type)
                        .border_style(border)
                        .title(" Details "),
                );
            f.render_widget(hint, area);
            return;
        };

        if self.shown != Some(panel.book_id) {
            self.shown = Some(panel.book_id);
            self.scroll.scroll_to_top();
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(border)
            .title(Span::styled(
                format!(" {} ", panel.title),
                Style::default()
                    .fg(theme.title)
                    .add_modifier(Modifier::BOLD),
            ));
        f.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Cover
                Constraint::Length(4), // Description
                Constraint::Min(3),    // Likers
                Constraint::Length(3), // Button
            ])
            .split(inner(area));

        let cover = Paragraph::new(Line::from(vec![
            Span::styled("Cover: ", Style::default().fg(theme.muted)),
            Span::styled(panel.img_url.clone(), Style::default().fg(theme.info)),
        ]));
        f.render_widget(cover, chunks[0]);

        let description = Paragraph::new(panel.description.clone())
            .style(Style::default().fg(theme.foreground))
            .wrap(Wrap { trim: true });
        f.render_widget(description, chunks[1]);

        // Liker list
        let likers_area = chunks[2];
        self.scroll.update_dimensions(
            panel.likers.len(),
            likers_area.height.saturating_sub(2) as usize,
        );
        let (start, end) = self.scroll.visible_range();
        let items: Vec<ListItem> = panel.likers[start..end]
            .iter()
            .map(|tag| {
                ListItem::new(Line::from(vec![
                    Span::styled("♥ ", Style::default().fg(theme.liker)),
                    Span::styled(tag.username.clone(), Style::default().fg(theme.foreground)),
                ]))
            })
            .collect();
        let likers = List::new(items).block(
            Block::default()
                .borders(Borders::TOP | Borders::BOTTOM)
                .border_style(Style::default().fg(theme.border))
                .title(format!(" Liked by ({}) ", panel.likers.len())),
        );
        f.render_widget(likers, likers_area);
        render_scrollbar(f, likers_area, &self.scroll, ScrollbarStyle::Minimal);

        // Like button, sized to its label
        let label = format!(" {} ", panel.button_label);
        let width = (label.chars().count() as u16 + 2).min(chunks[3].width);
        let button_area = Rect::new(chunks[3].x, chunks[3].y, width, chunks[3].height);
        let button = Paragraph::new(label)
            .alignment(Alignment::Center)
            .style(
                Style::default()
                    .fg(theme.button)
                    .add_modifier(Modifier::BOLD),
            )
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(theme.border_type)
                    .border_style(Style::default().fg(theme.button)),
            );
        f.render_widget(button, button_area);
        self.button_area = Some(button_area);
    }
}

impl Scrollable for DetailPanel {
    fn scroll_state_mut(&mut self) -> &mut ScrollState {
        &mut self.scroll
    }
}

impl Interactive for DetailPanel {
    fn handle_key(&mut self, key: KeyEvent) -> Handled {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.scroll_up(),
            KeyCode::Down | KeyCode::Char('j') => self.scroll_down(),
            KeyCode::Home | KeyCode::Char('g') => self.scroll_to_top(),
            KeyCode::End | KeyCode::Char('G') => self.scroll_to_bottom(),
            KeyCode::PageUp => self.page_up(),
            KeyCode::PageDown => self.page_down(),
            _ => return Handled::No,
        }
        Handled::Yes
    }

    fn focus_hint(&self) -> Option<&'static str> {
        Some("l/Enter:like  ↑↓:scroll likers")
    }
}
