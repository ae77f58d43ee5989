// Demo mode: an in-memory books backend
//
// Serves the same REST surface as the json-server the front end normally
// talks to, plus the atomic add-liker endpoint. Used by `--demo` so the TUI
// can run without a real backend, and by tests to drive the real HTTP client.
//
// Run with: BOOKLIKER_DEMO=1 cargo run --release

use crate::config::Config;
use crate::models::{Book, BookId, LikersPatch, User, UserId};
use anyhow::{Context, Result};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

/// Backend contents
#[derive(Debug, Default)]
pub struct DemoStore {
    books: BTreeMap<BookId, Book>,
    users: BTreeMap<UserId, User>,
    /// Every PATCH body received, in arrival order
    patches: Vec<(BookId, Vec<User>)>,
}

impl DemoStore {
    pub fn new(books: Vec<Book>, users: Vec<User>) -> Self {
        Self {
            books: books.into_iter().map(|b| (b.id, b)).collect(),
            users: users.into_iter().map(|u| (u.id, u)).collect(),
            patches: Vec::new(),
        }
    }

    /// A small library to click around in
    pub fn seeded() -> Self {
        let users = vec![
            User::new(1, "pouros"),
            User::new(2, "auer"),
            User::new(3, "macejkovic"),
        ];

        let book = |id, title: &str, description: &str, likers: Vec<User>| Book {
            id,
            title: title.to_string(),
            description: description.to_string(),
            img_url: format!("https://covers.example.org/{}.jpg", id),
            users: likers,
        };

        let books = vec![
            book(
                1,
                "Grapes of Wrath",
                "A portrait of the conflict between the powerful and the powerless.",
                vec![users[1].clone(), users[2].clone()],
            ),
            book(
                2,
                "Dune",
                "Set on the desert planet Arrakis, the story of the boy Paul Atreides.",
                vec![users[1].clone()],
            ),
            book(
                3,
                "The Left Hand of Darkness",
                "An envoy from the Ekumen visits the ambisexual world of Gethen.",
                Vec::new(),
            ),
            book(
                4,
                "A Wizard of Earthsea",
                "Ged, a young mage, unleashes a shadow on the world.",
                vec![users[0].clone()],
            ),
        ];

        Self::new(books, users)
    }

    #[cfg(test)]
    pub fn patches(&self) -> &[(BookId, Vec<User>)] {
        &self.patches
    }
}

pub type SharedStore = Arc<Mutex<DemoStore>>;

/// Errors returned by demo endpoints
#[derive(Debug)]
enum DemoError {
    NotFound(String),
    Conflict(String),
    Poisoned,
}

impl IntoResponse for DemoError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            DemoError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            DemoError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            DemoError::Poisoned => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "store lock poisoned".to_string(),
            ),
        };

        tracing::debug!("Demo backend: {} - {}", status, message);
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

fn lock(store: &SharedStore) -> Result<std::sync::MutexGuard<'_, DemoStore>, DemoError> {
    store.lock().map_err(|_| DemoError::Poisoned)
}

async fn list_books(State(store): State<SharedStore>) -> Result<Json<Vec<Book>>, DemoError> {
    let store = lock(&store)?;
    Ok(Json(store.books.values().cloned().collect()))
}

async fn get_book(
    State(store): State<SharedStore>,
    Path(id): Path<BookId>,
) -> Result<Json<Book>, DemoError> {
    let store = lock(&store)?;
    store
        .books
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| DemoError::NotFound(format!("book {}", id)))
}

async fn get_user(
    State(store): State<SharedStore>,
    Path(id): Path<UserId>,
) -> Result<Json<User>, DemoError> {
    let store = lock(&store)?;
    store
        .users
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| DemoError::NotFound(format!("user {}", id)))
}

/// Full replace of the liker list (no duplicate check, like json-server)
async fn patch_book(
    State(store): State<SharedStore>,
    Path(id): Path<BookId>,
    Json(patch): Json<LikersPatch>,
) -> Result<Json<Book>, DemoError> {
    let mut store = lock(&store)?;
    store.patches.push((id, patch.users.clone()));

    let book = store
        .books
        .get_mut(&id)
        .ok_or_else(|| DemoError::NotFound(format!("book {}", id)))?;
    book.users = patch.users;
    Ok(Json(book.clone()))
}

/// Atomic add-liker: check and append under one lock
async fn add_liker(
    State(store): State<SharedStore>,
    Path(id): Path<BookId>,
    Json(user): Json<User>,
) -> Result<Json<Book>, DemoError> {
    let mut store = lock(&store)?;
    let book = store
        .books
        .get_mut(&id)
        .ok_or_else(|| DemoError::NotFound(format!("book {}", id)))?;

    if book.is_liked_by(&user) {
        return Err(DemoError::Conflict(format!(
            "user {} already likes book {}",
            user.id, id
        )));
    }
    book.users.push(user);
    Ok(Json(book.clone()))
}

/// Build the demo router over a shared store
pub fn router(store: SharedStore) -> Router {
    Router::new()
        .route("/books", get(list_books))
        .route("/books/:id", get(get_book).patch(patch_book))
        .route("/books/:id/likers", post(add_liker))
        .route("/users/:id", get(get_user))
        .with_state(store)
}

/// A running demo backend on a local ephemeral port
///
/// The server shuts down when this handle is dropped.
pub struct DemoBackend {
    addr: SocketAddr,
    #[cfg(test)]
    store: SharedStore,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl DemoBackend {
    /// Serve `store` on 127.0.0.1 with an OS-assigned port
    pub async fn spawn(store: DemoStore) -> Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .context("Failed to bind demo backend")?;
        let addr = listener
            .local_addr()
            .context("Failed to read demo backend address")?;

        let store = Arc::new(Mutex::new(store));
        let app = router(store.clone());
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        tokio::spawn(async move {
            let served = axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_rx.await.ok();
                })
                .await;
            if let Err(e) = served {
                tracing::error!("Demo backend error: {}", e);
            }
        });

        tracing::info!("Demo backend listening on {}", addr);

        Ok(Self {
            addr,
            #[cfg(test)]
            store,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    /// Serve the built-in seed library
    pub async fn spawn_seeded() -> Result<Self> {
        Self::spawn(DemoStore::seeded()).await
    }

    /// Serve the seed library and point `config` at it (`--demo`)
    pub async fn serve_for(config: &mut Config) -> Result<Self> {
        let backend = Self::spawn_seeded().await?;
        config.api_url = backend.base_url();
        Ok(backend)
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    #[cfg(test)]
    pub fn store(&self) -> SharedStore {
        self.store.clone()
    }
}

impl Drop for DemoBackend {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
