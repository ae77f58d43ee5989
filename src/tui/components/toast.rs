//! Toast notification component
//!
//! A non-blocking overlay that auto-dismisses after a short duration.
//! Renders in the bottom-right corner on top of all other content.

use crate::theme::Theme;
use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use std::time::{Duration, Instant};
use unicode_width::UnicodeWidthStr;

/// A toast notification that auto-dismisses
pub struct Toast {
    pub message: String,
    /// Errors get the error border color
    pub is_error: bool,
    created_at: Instant,
    duration: Duration,
}

impl Toast {
    /// Create a new toast with default 2-second duration
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            is_error: false,
            created_at: Instant::now(),
            duration: Duration::from_secs(2),
        }
    }

    /// Error toast, shown a little longer
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            is_error: true,
            duration: Duration::from_secs(4),
            ..Self::new(message)
        }
    }

    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() >= self.duration
    }

    /// Render the toast in the bottom-right corner
    ///
    /// Uses `Clear` so the toast is drawn on top of other content.
    pub fn render(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        // Add 4 for padding (2 chars each side) and border
        let width = (self.message.width() as u16 + 4).min(area.width.saturating_sub(4));
        let height = 3; // 1 line of text + 2 for borders

        let x = area.right().saturating_sub(width + 2);
        let y = area.bottom().saturating_sub(height + 2);
        let toast_area = Rect::new(x, y, width, height.min(area.height));

        let accent = if self.is_error {
            theme.error
        } else {
            theme.highlight
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(accent))
            .style(Style::default().bg(theme.background));

        let text = Paragraph::new(self.message.as_str())
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.foreground))
            .block(block);

        f.render_widget(Clear, toast_area);
        f.render_widget(text, toast_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_toast_is_not_expired() {
        let toast = Toast::new("You already liked this book!");
        assert!(!toast.is_expired());
        assert!(!toast.is_error);
    }

    #[test]
    fn zero_duration_expires_immediately() {
        let toast = Toast {
            duration: Duration::ZERO,
            ..Toast::new("gone")
        };
        assert!(toast.is_expired());
    }

    #[test]
    fn error_toast_is_flagged() {
        assert!(Toast::error("Like failed").is_error);
    }
}
