// Modal system for TUI overlays
//
// Modals handle their own input and return actions. App just holds
// Option<Modal>; input routing acts on the returned ModalAction.

use crossterm::event::KeyCode;

/// Actions returned by modal input handling
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalAction {
    /// Input consumed, no state change needed
    None,
    /// Close the modal
    Close,
    /// Quit the application
    Quit,
}

/// Available modal types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modal {
    /// Help overlay - shows keyboard and mouse shortcuts
    Help,
}

impl Modal {
    pub fn help() -> Self {
        Modal::Help
    }

    /// Handle keyboard input, return action for caller to execute
    pub fn handle_input(&mut self, key: KeyCode) -> ModalAction {
        match self {
            Modal::Help => match key {
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Enter => ModalAction::Close,
                KeyCode::Char('q') | KeyCode::Char('Q') => ModalAction::Quit,
                _ => ModalAction::None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn help_closes_on_esc_and_question_mark() {
        let mut modal = Modal::help();
        assert_eq!(modal.handle_input(KeyCode::Esc), ModalAction::Close);
        assert_eq!(modal.handle_input(KeyCode::Char('?')), ModalAction::Close);
    }

    #[test]
    fn help_swallows_other_keys() {
        let mut modal = Modal::help();
        assert_eq!(modal.handle_input(KeyCode::Char('l')), ModalAction::None);
        assert_eq!(modal.handle_input(KeyCode::Tab), ModalAction::None);
    }

    #[test]
    fn q_quits_from_help() {
        let mut modal = Modal::help();
        assert_eq!(modal.handle_input(KeyCode::Char('q')), ModalAction::Quit);
        assert_eq!(modal.handle_input(KeyCode::Char('Q')), ModalAction::Quit);
    }
}
