//! Interactive trait for components that handle keyboard input
//!
//! The App routes input to the focused component after its own global
//! and action keys.

use super::Component;
use crossterm::event::KeyEvent;

/// Result of handling a key event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handled {
    /// Event was consumed by the component
    Yes,
    /// Event was not handled, should bubble up
    No,
}

impl From<bool> for Handled {
    fn from(handled: bool) -> Self {
        if handled {
            Self::Yes
        } else {
            Self::No
        }
    }
}

/// Trait for components that handle keyboard input
///
/// ```text
/// KeyEvent
///    │
///    ▼
/// App (modal, then global keys: ?, q, Tab)
///    │
///    │ if not handled
///    ▼
/// App action keys (Enter/Space select, l like)
///    │
///    │ if not handled
///    ▼
/// Focused Component (via Interactive trait)
/// ```
pub trait Interactive: Component {
    /// Returns `Handled::Yes` if the component consumed the event
    fn handle_key(&mut self, key: KeyEvent) -> Handled;

    /// Keybind hints shown in the status bar when this component is focused
    fn focus_hint(&self) -> Option<&'static str> {
        None
    }
}
