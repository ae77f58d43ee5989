//! Scrollable trait for components with scrollable content

use super::Component;
use crate::tui::scroll::ScrollState;

/// Trait for components with scrollable content
///
/// Components own their `ScrollState` and expose it through this trait;
/// the navigation methods delegate to it.
pub trait Scrollable: Component {
    fn scroll_state_mut(&mut self) -> &mut ScrollState;

    fn scroll_up(&mut self) {
        self.scroll_state_mut().scroll_up();
    }

    fn scroll_down(&mut self) {
        self.scroll_state_mut().scroll_down();
    }

    fn scroll_to_top(&mut self) {
        self.scroll_state_mut().scroll_to_top();
    }

    fn scroll_to_bottom(&mut self) {
        self.scroll_state_mut().scroll_to_bottom();
    }

    fn page_up(&mut self) {
        self.scroll_state_mut().page_up();
    }

    fn page_down(&mut self) {
        self.scroll_state_mut().page_down();
    }
}

/// Scrollable content with a cursor over its items
pub trait Selectable: Scrollable {
    fn selected_index(&self) -> Option<usize>;

    /// Set the cursor; implementations clamp to the item count
    fn select(&mut self, index: usize);

    fn item_count(&self) -> usize;

    fn select_next(&mut self) {
        match self.selected_index() {
            Some(current) if current + 1 < self.item_count() => self.select(current + 1),
            None if self.item_count() > 0 => self.select(0),
            _ => {}
        }
    }

    fn select_previous(&mut self) {
        match self.selected_index() {
            Some(current) if current > 0 => self.select(current - 1),
            None if self.item_count() > 0 => self.select(0),
            _ => {}
        }
    }

    fn select_first(&mut self) {
        if self.item_count() > 0 {
            self.select(0);
        }
    }

    fn select_last(&mut self) {
        let count = self.item_count();
        if count > 0 {
            self.select(count - 1);
        }
    }
}
