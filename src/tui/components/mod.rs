// Components module - UI building blocks
//
// Content panels (own their state, implement the trait system):
// - List panel: one entry per book, cursor and selection
// - Detail panel: the visible book's panel with its liker list and button
// - Logs panel: system log entries
//
// Shell pieces rendered every frame:
// - Title bar, status bar, toast

pub mod detail_panel;
pub mod list_panel;
pub mod logs_panel;
pub mod scrollbar;
pub mod status_bar;
pub mod title_bar;
pub mod toast;

pub use detail_panel::DetailPanel;
pub use list_panel::ListPanel;
pub use logs_panel::LogsPanel;
pub use toast::Toast;

use ratatui::layout::Rect;

/// Area inside a one-cell border
pub(crate) fn inner(area: Rect) -> Rect {
    Rect::new(
        area.x.saturating_add(1),
        area.y.saturating_add(1),
        area.width.saturating_sub(2),
        area.height.saturating_sub(2),
    )
}

/// Whether the terminal cell (column, row) lies inside `area`
pub(crate) fn hit(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x && column < area.right() && row >= area.y && row < area.bottom()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_excludes_right_and_bottom_edges() {
        let area = Rect::new(2, 3, 4, 2);
        assert!(hit(area, 2, 3));
        assert!(hit(area, 5, 4));
        assert!(!hit(area, 6, 4));
        assert!(!hit(area, 5, 5));
        assert!(!hit(area, 1, 3));
    }

    #[test]
    fn inner_of_tiny_area_is_empty() {
        let area = inner(Rect::new(0, 0, 1, 1));
        assert_eq!(area.width, 0);
        assert_eq!(area.height, 0);
    }
}
