// Scroll state shared by the TUI panels
//
// Each component owns its scroll state; App only routes input.
// - Book list: manual scroll, keeps the cursor in view
// - Liker list: manual scroll
// - Logs: auto-follow (new entries keep the view at the bottom)

/// Scroll state for a single panel
///
/// Owns position, content size and viewport size.
#[derive(Debug, Clone)]
pub struct ScrollState {
    /// Current scroll offset (line/item index at top of viewport)
    offset: usize,

    /// Total number of items/lines in content
    total: usize,

    /// Number of items/lines visible in viewport
    viewport: usize,

    /// Whether to auto-follow new content (scroll to bottom)
    /// User scrolling up disables this; scrolling to bottom re-enables
    pub auto_follow: bool,
}

impl ScrollState {
    /// Create new scroll state with auto-follow enabled
    pub fn new() -> Self {
        Self {
            offset: 0,
            total: 0,
            viewport: 0,
            auto_follow: true,
        }
    }

    /// Create scroll state with auto-follow disabled (manual scroll)
    pub fn manual() -> Self {
        Self {
            auto_follow: false,
            ..Self::new()
        }
    }

    /// Update content and viewport dimensions
    /// Call this each render frame with current sizes
    pub fn update_dimensions(&mut self, total: usize, viewport: usize) {
        self.total = total;
        self.viewport = viewport;

        if self.auto_follow {
            self.offset = self.max_offset();
        } else {
            self.offset = self.offset.min(self.max_offset());
        }
    }

    /// Scroll up by one unit
    /// Disables auto-follow (user took control)
    pub fn scroll_up(&mut self) {
        if self.offset > 0 {
            self.offset -= 1;
            self.auto_follow = false;
        }
    }

    /// Scroll down by one unit
    pub fn scroll_down(&mut self) {
        if self.offset < self.max_offset() {
            self.offset += 1;
        }
    }

    pub fn page_up(&mut self) {
        let page = self.viewport.max(1);
        self.offset = self.offset.saturating_sub(page);
        self.auto_follow = false;
    }

    pub fn page_down(&mut self) {
        let page = self.viewport.max(1);
        self.offset = (self.offset + page).min(self.max_offset());
    }

    pub fn scroll_to_top(&mut self) {
        self.offset = 0;
        self.auto_follow = false;
    }

    /// Jump to bottom (and enable auto-follow)
    pub fn scroll_to_bottom(&mut self) {
        self.offset = self.max_offset();
        self.auto_follow = true;
    }

    /// Move the viewport just enough to show item `index`
    pub fn ensure_visible(&mut self, index: usize) {
        if index < self.offset {
            self.offset = index;
        } else if self.viewport > 0 && index >= self.offset + self.viewport {
            self.offset = index + 1 - self.viewport;
        }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Get visible range (start_index, end_index)
    pub fn visible_range(&self) -> (usize, usize) {
        let start = self.offset.min(self.total);
        let end = (self.offset + self.viewport).min(self.total);
        (start, end)
    }

    /// Check if content overflows viewport (scrollbar needed)
    pub fn needs_scrollbar(&self) -> bool {
        self.total > self.viewport
    }

    fn max_offset(&self) -> usize {
        self.total.saturating_sub(self.viewport)
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn viewport(&self) -> usize {
        self.viewport
    }
}

impl Default for ScrollState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_follow_on_new_content() {
        let mut scroll = ScrollState::new();
        assert!(scroll.auto_follow);

        scroll.update_dimensions(10, 5);
        assert_eq!(scroll.offset(), 5); // At bottom

        scroll.update_dimensions(15, 5);
        assert_eq!(scroll.offset(), 10); // Still at bottom
    }

    #[test]
    fn test_scroll_up_disables_auto_follow() {
        let mut scroll = ScrollState::new();
        scroll.update_dimensions(20, 5);

        scroll.scroll_up();
        assert!(!scroll.auto_follow);
        assert_eq!(scroll.offset(), 14);
    }

    #[test]
    fn test_scroll_to_bottom_enables_auto_follow() {
        let mut scroll = ScrollState::new();
        scroll.update_dimensions(20, 5);

        scroll.scroll_up();
        scroll.scroll_up();
        scroll.scroll_to_bottom();
        assert!(scroll.auto_follow);
        assert_eq!(scroll.offset(), 15);
    }

    #[test]
    fn test_manual_scroll_mode() {
        let mut scroll = ScrollState::manual();

        scroll.update_dimensions(10, 5);
        assert_eq!(scroll.offset(), 0);

        scroll.update_dimensions(15, 5);
        assert_eq!(scroll.offset(), 0); // Not following
    }

    #[test]
    fn test_ensure_visible_moves_minimally() {
        let mut scroll = ScrollState::manual();
        scroll.update_dimensions(20, 5);

        scroll.ensure_visible(7);
        assert_eq!(scroll.visible_range(), (3, 8));

        scroll.ensure_visible(4);
        assert_eq!(scroll.visible_range(), (3, 8)); // Already visible

        scroll.ensure_visible(1);
        assert_eq!(scroll.visible_range(), (1, 6));
    }

    #[test]
    fn test_visible_range_when_content_fits() {
        let mut scroll = ScrollState::manual();
        scroll.update_dimensions(3, 10);
        assert_eq!(scroll.visible_range(), (0, 3));
        assert!(!scroll.needs_scrollbar());
    }
}
