// TUI application state
//
// App owns the page and every panel. It is the only place the page is
// mutated: input handlers select panels, and results of spawned fetch
// chains arrive as AppEvents and are applied here.

use super::components::{DetailPanel, ListPanel, LogsPanel, Toast};
use super::modal::Modal;
use super::traits::{ComponentId, Handled, Interactive};
use crate::api::BooksApi;
use crate::config::Config;
use crate::events::AppEvent;
use crate::like::{LikeMode, LikeOutcome, LikeWorkflow, ALREADY_LIKED_NOTICE};
use crate::logging::LogBuffer;
use crate::models::{User, UserId};
use crate::page::{render, Page};
use crate::session::Session;
use crate::tasks;
use crate::theme::Theme;
use crossterm::event::KeyEvent;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Toast shown when a like fails at any step
pub const LIKE_FAILED_NOTICE: &str = "Like failed";

/// Backend handles shared with spawned tasks
#[derive(Clone)]
pub struct Services {
    pub api: Arc<dyn BooksApi>,
    pub workflow: Arc<LikeWorkflow>,
    pub session: Session,
}

/// Progress of the initial book fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Ready,
    Failed(String),
}

/// Main application state for the TUI
pub struct App {
    /// Element tree: list entries and one detail panel per book
    pub page: Page,

    /// Focused panel
    pub focus: ComponentId,

    pub list_panel: ListPanel,
    pub detail_panel: DetailPanel,
    pub logs_panel: LogsPanel,

    /// Log buffer for system logs display
    pub log_buffer: LogBuffer,

    pub theme: Theme,
    pub modal: Option<Modal>,
    pub toast: Option<Toast>,

    /// Session user once resolved
    pub user: Option<User>,

    pub load_state: LoadState,

    /// Backend base URL (status bar)
    pub api_url: String,

    pub should_quit: bool,

    /// Animation frame counter for the loading spinner
    animation_frame: usize,

    services: Services,
    tx: mpsc::Sender<AppEvent>,
}

impl App {
    pub fn new(
        services: Services,
        tx: mpsc::Sender<AppEvent>,
        log_buffer: LogBuffer,
        config: &Config,
    ) -> Self {
        Self {
            page: Page::new(),
            focus: ComponentId::default(),
            list_panel: ListPanel::new(),
            detail_panel: DetailPanel::new(),
            logs_panel: LogsPanel::new(),
            log_buffer,
            theme: Theme::by_name(&config.theme),
            modal: None,
            toast: None,
            user: None,
            load_state: LoadState::Loading,
            api_url: config.api_url.clone(),
            should_quit: false,
            animation_frame: 0,
            services,
            tx,
        }
    }

    /// Resolve the session user and fetch the books (once)
    pub fn start(&self) -> JoinHandle<()> {
        tasks::spawn_bootstrap(
            self.services.api.clone(),
            self.services.session,
            self.tx.clone(),
        )
    }

    // ─────────────────────────────────────────────────────────────
    // Background results
    // ─────────────────────────────────────────────────────────────

    /// Apply the result of a spawned task to the page
    pub fn apply_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::BooksLoaded(books) => {
                self.page.display_books(&books);
                self.list_panel.set_count(self.page.list_entries().len());
                self.load_state = LoadState::Ready;
            }
            AppEvent::BooksFailed(error) => {
                self.load_state = LoadState::Failed(error);
                self.show_error_toast("Could not load books");
            }
            AppEvent::SessionReady(user) => {
                self.user = Some(user);
            }
            AppEvent::SessionFailed => {
                self.show_error_toast(format!(
                    "Could not find user {}",
                    self.services.session.user_id()
                ));
            }
            AppEvent::LikeFinished(LikeOutcome::Liked { book_id, user }) => {
                // The page is fetched once, so it can already show a liker the
                // backend had dropped in the meantime
                let shown = self
                    .page
                    .panel(book_id)
                    .is_some_and(|p| p.likers.iter().any(|t| t.user_id == user.id));
                if shown {
                    tracing::debug!("{} is already listed on book {}", user.username, book_id);
                } else {
                    self.page.append_liker(book_id, render::liker_tag(&user));
                }
            }
            AppEvent::LikeFinished(LikeOutcome::AlreadyLiked { .. }) => {
                self.show_toast(ALREADY_LIKED_NOTICE);
            }
            AppEvent::LikeFailed { book_id, error } => {
                tracing::debug!("Like of book {} failed: {}", book_id, error);
                self.show_error_toast(LIKE_FAILED_NOTICE);
            }
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Actions
    // ─────────────────────────────────────────────────────────────

    /// Select list entry `index`: move the cursor there and show its panel
    pub fn select_index(&mut self, index: usize) -> bool {
        use super::traits::Selectable;

        let Some(book_id) = self.page.list_entries().get(index).map(|e| e.book_id) else {
            return false;
        };
        self.list_panel.select(index);
        let shown = self.page.show_panel(book_id);
        tracing::debug!("Selected book {}", book_id);
        shown
    }

    /// Select the entry under the list cursor
    pub fn select_under_cursor(&mut self) -> bool {
        match self.list_panel.cursor() {
            Some(index) => self.select_index(index),
            None => false,
        }
    }

    /// Press the like button of the visible panel
    ///
    /// Spawns an independent like task; its result comes back as an
    /// AppEvent. Returns None when no panel is visible.
    pub fn like_visible(&mut self) -> Option<JoinHandle<()>> {
        let book_id = self.page.visible_panel()?.book_id;
        tracing::debug!("Like pressed for book {}", book_id);

        Some(tasks::spawn_like(
            self.services.workflow.clone(),
            self.services.api.clone(),
            self.services.session,
            self.user.clone(),
            book_id,
            self.tx.clone(),
        ))
    }

    // ─────────────────────────────────────────────────────────────
    // Focus and input routing
    // ─────────────────────────────────────────────────────────────

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next_focus();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev_focus();
    }

    /// Route a key to the focused panel
    pub fn dispatch_to_focused(&mut self, key: KeyEvent) -> Handled {
        match self.focus {
            ComponentId::List => self.list_panel.handle_key(key),
            ComponentId::Detail => self.detail_panel.handle_key(key),
            ComponentId::Logs => Handled::No,
        }
    }

    pub fn focus_hint(&self) -> Option<&'static str> {
        match self.focus {
            ComponentId::List => self.list_panel.focus_hint(),
            ComponentId::Detail => self.detail_panel.focus_hint(),
            ComponentId::Logs => None,
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Display helpers
    // ─────────────────────────────────────────────────────────────

    pub fn show_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast::new(message));
    }

    pub fn show_error_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast::error(message));
    }

    pub fn clear_expired_toast(&mut self) {
        if self.toast.as_ref().is_some_and(|t| t.is_expired()) {
            self.toast = None;
        }
    }

    pub fn tick_animation(&mut self) {
        self.animation_frame = self.animation_frame.wrapping_add(1);
    }

    pub fn spinner_char(&self) -> char {
        const SPINNER: [char; 4] = ['◐', '◓', '◑', '◒'];
        SPINNER[self.animation_frame % SPINNER.len()]
    }

    pub fn like_mode(&self) -> LikeMode {
        self.services.workflow.mode()
    }

    pub fn session_user_id(&self) -> UserId {
        self.services.session.user_id()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::api::HttpBooksApi;
    use crate::demo::DemoBackend;
    use crate::models::Book;
    use std::time::Duration;

    /// App wired to a seeded demo backend, plus the receiver for its events
    pub(crate) async fn demo_app(mode: LikeMode) -> (DemoBackend, App, mpsc::Receiver<AppEvent>) {
        let backend = DemoBackend::spawn_seeded().await.unwrap();
        let api: Arc<dyn BooksApi> =
            Arc::new(HttpBooksApi::new(backend.base_url(), Duration::from_secs(5)).unwrap());
        let services = Services {
            workflow: Arc::new(LikeWorkflow::new(api.clone(), mode)),
            api,
            session: Session::new(1),
        };
        let (tx, rx) = mpsc::channel(32);
        let config = Config {
            api_url: backend.base_url(),
            ..Config::default()
        };
        let app = App::new(services, tx, LogBuffer::new(), &config);
        (backend, app, rx)
    }

    /// Run bootstrap and apply its two events
    pub(crate) async fn bootstrapped(app: &mut App, rx: &mut mpsc::Receiver<AppEvent>) {
        app.start().await.unwrap();
        for _ in 0..2 {
            let event = rx.recv().await.unwrap();
            app.apply_event(event);
        }
    }

    fn book(id: u64, title: &str) -> Book {
        Book {
            id,
            title: title.to_string(),
            description: String::new(),
            img_url: String::new(),
            users: Vec::new(),
        }
    }

    #[tokio::test]
    async fn bootstrap_renders_every_book() {
        let (_backend, mut app, mut rx) = demo_app(LikeMode::CheckThenPatch).await;
        bootstrapped(&mut app, &mut rx).await;

        assert_eq!(app.load_state, LoadState::Ready);
        assert_eq!(app.page.list_entries().len(), 4);
        assert_eq!(app.page.panels().len(), 4);
        assert_eq!(app.user.as_ref().map(|u| u.id), Some(1));
        assert!(app.page.visible_panel().is_none());
    }

    #[tokio::test]
    async fn selecting_an_entry_shows_only_its_panel() {
        let (_backend, mut app, _rx) = demo_app(LikeMode::CheckThenPatch).await;
        app.apply_event(AppEvent::BooksLoaded(vec![book(1, "A"), book(2, "B")]));

        assert!(app.select_index(1));
        assert_eq!(app.page.visible_panel().map(|p| p.book_id), Some(2));
        assert_eq!(app.list_panel.cursor(), Some(1));

        assert!(app.select_index(0));
        let visible: Vec<_> = app.page.panels().iter().filter(|p| p.visible).collect();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].book_id, 1);

        assert!(!app.select_index(5));
    }

    #[tokio::test]
    async fn like_appends_tag_then_duplicate_shows_notice() {
        let (_backend, mut app, mut rx) = demo_app(LikeMode::CheckThenPatch).await;
        bootstrapped(&mut app, &mut rx).await;

        // Third seeded book has no likers
        assert!(app.select_index(2));
        let book_id = app.page.visible_panel().unwrap().book_id;
        assert!(app.page.panel(book_id).unwrap().likers.is_empty());

        app.like_visible().unwrap().await.unwrap();
        let event = rx.recv().await.unwrap();
        app.apply_event(event);

        let likers = &app.page.panel(book_id).unwrap().likers;
        assert_eq!(likers.len(), 1);
        assert_eq!(likers[0].username, "pouros");
        assert!(app.toast.is_none());

        app.like_visible().unwrap().await.unwrap();
        let event = rx.recv().await.unwrap();
        app.apply_event(event);

        assert_eq!(app.page.panel(book_id).unwrap().likers.len(), 1);
        assert_eq!(
            app.toast.as_ref().map(|t| t.message.as_str()),
            Some(ALREADY_LIKED_NOTICE)
        );
    }

    #[tokio::test]
    async fn liked_user_already_listed_gets_no_second_tag() {
        let (_backend, mut app, _rx) = demo_app(LikeMode::CheckThenPatch).await;
        let mut listed = book(1, "A");
        listed.users = vec![User::new(1, "pouros")];
        app.apply_event(AppEvent::BooksLoaded(vec![listed]));

        app.apply_event(AppEvent::LikeFinished(LikeOutcome::Liked {
            book_id: 1,
            user: User::new(1, "pouros"),
        }));

        assert_eq!(app.page.panel(1).unwrap().likers.len(), 1);
    }

    #[tokio::test]
    async fn like_without_visible_panel_does_nothing() {
        let (_backend, mut app, _rx) = demo_app(LikeMode::Atomic).await;
        assert!(app.like_visible().is_none());
    }

    #[tokio::test]
    async fn failed_like_shows_error_toast() {
        let (_backend, mut app, _rx) = demo_app(LikeMode::CheckThenPatch).await;
        app.apply_event(AppEvent::LikeFailed {
            book_id: 9,
            error: "could not fetch book 9".to_string(),
        });

        let toast = app.toast.as_ref().unwrap();
        assert_eq!(toast.message, LIKE_FAILED_NOTICE);
        assert!(toast.is_error);
    }

    #[tokio::test]
    async fn failed_bootstrap_leaves_page_empty() {
        let (_backend, mut app, _rx) = demo_app(LikeMode::CheckThenPatch).await;
        app.apply_event(AppEvent::BooksFailed("connection refused".to_string()));

        assert!(app.page.is_empty());
        assert!(matches!(app.load_state, LoadState::Failed(_)));
    }
}
