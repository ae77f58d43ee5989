//! Core component trait
//!
//! Every panel that can be rendered implements `Component`.

use crate::logging::LogEntry;
use crate::page::Page;
use crate::theme::Theme;
use ratatui::{layout::Rect, Frame};

/// Unique identifier for a panel
///
/// Used for focus tracking and panel-specific border colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ComponentId {
    /// Book list (default focus)
    #[default]
    List,
    /// Detail panel of the selected book
    Detail,
    /// System logs (display only)
    Logs,
}

impl ComponentId {
    /// Cycle to next focusable component (Tab behavior)
    pub fn next_focus(self) -> Self {
        match self {
            Self::List => Self::Detail,
            Self::Detail | Self::Logs => Self::List,
        }
    }

    /// Cycle to previous focusable component (Shift+Tab behavior)
    ///
    /// Only two panels take focus, so this mirrors `next_focus`.
    pub fn prev_focus(self) -> Self {
        self.next_focus()
    }
}

/// Immutable context passed to components during rendering
///
/// Components only see what they need to draw. The page is read here and
/// mutated only by the event loop.
pub struct RenderContext<'a> {
    /// Color theme for styling
    pub theme: &'a Theme,

    /// Which component currently has focus
    pub focus: ComponentId,

    /// Element tree to draw
    pub page: &'a Page,

    /// Newest log entries (oldest first)
    pub logs: &'a [LogEntry],
}

impl<'a> RenderContext<'a> {
    pub fn is_focused(&self, id: ComponentId) -> bool {
        self.focus == id
    }
}

/// Base trait for all panels
///
/// Rendering takes `&mut self` so a panel can record the viewport it was
/// given: scroll dimensions and the hit areas used for mouse clicks.
pub trait Component {
    fn id(&self) -> ComponentId;

    fn render(&mut self, f: &mut Frame, area: Rect, ctx: &RenderContext);
}
