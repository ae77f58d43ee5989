// TUI module - Terminal User Interface
//
// This module manages the terminal UI using ratatui. It handles:
// - Terminal initialization and cleanup
// - Event loop (keyboard and mouse input, timer ticks)
// - Applying results of background fetch chains to the page

pub mod app;
pub mod components;
pub mod layout;
pub mod modal;
pub mod scroll;
pub mod traits;
pub mod views;

use crate::config::Config;
use crate::events::AppEvent;
use crate::logging::LogBuffer;
use anyhow::{Context, Result};
use app::{App, Services};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use modal::{Modal, ModalAction};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;
use tokio::sync::mpsc;
use traits::{ComponentId, Handled};

/// Run the TUI
///
/// Sets up the terminal, starts the bootstrap fetch, runs the event loop,
/// and restores the terminal when done.
pub async fn run_tui(services: Services, log_buffer: LogBuffer, config: Config) -> Result<()> {
    let (tx, mut event_rx) = mpsc::channel(100);
    let mut app = App::new(services, tx, log_buffer, &config);

    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let _bootstrap = app.start();

    let result = run_event_loop(&mut terminal, &mut app, &mut event_rx).await;

    // Restore terminal
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

/// Main event loop
///
/// Waits on three sources and reacts to whichever is ready first:
/// 1. Keyboard and mouse input
/// 2. Timer ticks (spinner, toast expiry)
/// 3. Results of spawned fetch chains
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    event_rx: &mut mpsc::Receiver<AppEvent>,
) -> Result<()> {
    let mut tick_interval = tokio::time::interval(Duration::from_millis(200));

    loop {
        terminal
            .draw(|f| views::draw(f, app))
            .context("Failed to draw terminal")?;

        tokio::select! {
            // Keyboard or mouse input
            _ = async {
                if event::poll(Duration::from_millis(10)).unwrap_or(false) {
                    match event::read() {
                        Ok(Event::Key(key_event)) => handle_key_event(app, key_event),
                        Ok(Event::Mouse(mouse_event)) => handle_mouse_event(app, mouse_event),
                        _ => {}
                    }
                }
            } => {}

            _ = tick_interval.tick() => {
                app.tick_animation();
            }

            Some(app_event) = event_rx.recv() => {
                app.apply_event(app_event);
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Handle keyboard input
/// Layered dispatch: Modal → Global → Panel actions → Focused component
fn handle_key_event(app: &mut App, key_event: KeyEvent) {
    // Release/repeat events are ignored (Windows reports both)
    if key_event.kind != KeyEventKind::Press {
        return;
    }

    if handle_modal_input(app, &key_event) {
        return;
    }

    if handle_global_keys(app, &key_event) {
        return;
    }

    if handle_action_keys(app, &key_event) {
        return;
    }

    app.dispatch_to_focused(key_event);
}

/// Handle modal input - returns true if a modal absorbed the input
fn handle_modal_input(app: &mut App, key_event: &KeyEvent) -> bool {
    let Some(modal) = app.modal.as_mut() else {
        return false;
    };

    match modal.handle_input(key_event.code) {
        ModalAction::None => {}
        ModalAction::Close => app.modal = None,
        ModalAction::Quit => app.should_quit = true,
    }

    true
}

/// Handle global keys - returns true if handled
fn handle_global_keys(app: &mut App, key_event: &KeyEvent) -> bool {
    match key_event.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => app.should_quit = true,
        KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true
        }
        KeyCode::Char('?') => app.modal = Some(Modal::help()),
        KeyCode::Tab | KeyCode::Right => {
            if key_event.modifiers.contains(KeyModifiers::SHIFT) {
                app.focus_prev();
            } else {
                app.focus_next();
            }
        }
        KeyCode::BackTab | KeyCode::Left => app.focus_prev(),
        _ => return false,
    }
    true
}

/// Panel action keys: select in the list, like in the detail panel
fn handle_action_keys(app: &mut App, key_event: &KeyEvent) -> bool {
    match (app.focus, key_event.code) {
        (ComponentId::List, KeyCode::Enter | KeyCode::Char(' ')) => {
            app.select_under_cursor();
            true
        }
        (ComponentId::Detail, KeyCode::Enter | KeyCode::Char('l')) => {
            app.like_visible();
            true
        }
        _ => false,
    }
}

/// Handle mouse input
fn handle_mouse_event(app: &mut App, mouse_event: MouseEvent) {
    if app.modal.is_some() {
        return;
    }

    let (column, row) = (mouse_event.column, mouse_event.row);
    match mouse_event.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if let Some(index) = app.list_panel.entry_at(column, row) {
                app.focus = ComponentId::List;
                app.select_index(index);
            } else if app.detail_panel.button_hit(column, row) {
                app.focus = ComponentId::Detail;
                app.like_visible();
            }
        }
        MouseEventKind::ScrollUp => {
            let key_event = KeyEvent::new(KeyCode::Up, KeyModifiers::NONE);
            if app.dispatch_to_focused(key_event) == Handled::No {
                tracing::trace!("Scroll ignored by focused panel");
            }
        }
        MouseEventKind::ScrollDown => {
            let key_event = KeyEvent::new(KeyCode::Down, KeyModifiers::NONE);
            if app.dispatch_to_focused(key_event) == Handled::No {
                tracing::trace!("Scroll ignored by focused panel");
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::app::tests::{bootstrapped, demo_app};
    use super::*;
    use crate::like::LikeMode;
    use crate::models::{Book, User};
    use ratatui::backend::TestBackend;

    fn press(app: &mut App, code: KeyCode) {
        handle_key_event(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn click(app: &mut App, column: u16, row: u16) {
        handle_mouse_event(
            app,
            MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column,
                row,
                modifiers: KeyModifiers::NONE,
            },
        );
    }

    fn draw(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal.draw(|f| views::draw(f, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn books() -> Vec<Book> {
        vec![
            Book {
                id: 1,
                title: "Grapes of Wrath".to_string(),
                description: "Dust bowl".to_string(),
                img_url: "https://covers.example.org/1.jpg".to_string(),
                users: vec![User::new(2, "auer")],
            },
            Book {
                id: 2,
                title: "Dune".to_string(),
                description: "Spice".to_string(),
                img_url: String::new(),
                users: Vec::new(),
            },
        ]
    }

    #[tokio::test]
    async fn enter_on_list_shows_panel_under_cursor() {
        let (_backend, mut app, _rx) = demo_app(LikeMode::CheckThenPatch).await;
        app.apply_event(AppEvent::BooksLoaded(books()));

        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.page.visible_panel().map(|p| p.book_id), Some(2));
    }

    #[tokio::test]
    async fn tab_moves_focus_and_quit_stops_loop() {
        let (_backend, mut app, _rx) = demo_app(LikeMode::CheckThenPatch).await;

        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, ComponentId::Detail);
        press(&mut app, KeyCode::Left);
        assert_eq!(app.focus, ComponentId::List);

        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[tokio::test]
    async fn help_modal_swallows_keys_until_closed() {
        let (_backend, mut app, _rx) = demo_app(LikeMode::CheckThenPatch).await;
        app.apply_event(AppEvent::BooksLoaded(books()));

        press(&mut app, KeyCode::Char('?'));
        assert!(app.modal.is_some());

        press(&mut app, KeyCode::Enter);
        assert!(app.modal.is_none());
        assert!(app.page.visible_panel().is_none());
    }

    #[tokio::test]
    async fn like_key_on_detail_panel_likes_visible_book() {
        let (_backend, mut app, mut rx) = demo_app(LikeMode::Atomic).await;
        bootstrapped(&mut app, &mut rx).await;

        // Third seeded book has no likers
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char(' '));
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Char('l'));

        let event = tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .unwrap()
            .unwrap();
        app.apply_event(event);

        let panel = app.page.visible_panel().unwrap();
        assert_eq!(panel.likers.len(), 1);
        assert_eq!(panel.likers[0].user_id, 1);
    }

    #[tokio::test]
    async fn click_selects_entry_after_render() {
        let (_backend, mut app, _rx) = demo_app(LikeMode::CheckThenPatch).await;
        app.apply_event(AppEvent::BooksLoaded(books()));
        draw(&mut app);

        // Title bar takes rows 0-2, list border is row 3, entries start at row 4
        click(&mut app, 5, 5);
        assert_eq!(app.page.visible_panel().map(|p| p.book_id), Some(2));
    }

    #[tokio::test]
    async fn rendered_panel_shows_likers_and_button() {
        let (_backend, mut app, _rx) = demo_app(LikeMode::CheckThenPatch).await;
        app.apply_event(AppEvent::BooksLoaded(books()));
        app.select_index(0);

        let screen = draw(&mut app);
        assert!(screen.contains("Grapes of Wrath"));
        assert!(screen.contains("auer"));
        assert!(screen.contains("Like Book"));
    }
}
