// Background fetch chains
//
// Bootstrap and like actions run as independent spawned tasks. Each one
// reports back to the event loop over the AppEvent channel; failures are
// logged and turned into events, never retried.

use crate::api::BooksApi;
use crate::events::AppEvent;
use crate::like::LikeWorkflow;
use crate::models::{BookId, User};
use crate::session::Session;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Resolve the session user and fetch the book collection once
///
/// The two requests run concurrently and each reports its own event, so a
/// slow user lookup never holds up the book list.
pub fn spawn_bootstrap(
    api: Arc<dyn BooksApi>,
    session: Session,
    tx: mpsc::Sender<AppEvent>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let resolve_user = async {
            let event = match session.resolve(api.as_ref()).await {
                Ok(user) => AppEvent::SessionReady(user),
                Err(e) => {
                    tracing::error!("Could not resolve user {}: {}", session.user_id(), e);
                    AppEvent::SessionFailed
                }
            };
            let _ = tx.send(event).await;
        };

        let fetch_books = async {
            let event = match api.list_books().await {
                Ok(books) => {
                    tracing::info!("Fetched {} books", books.len());
                    AppEvent::BooksLoaded(books)
                }
                Err(e) => {
                    tracing::error!("Could not fetch books: {}", e);
                    AppEvent::BooksFailed(e.to_string())
                }
            };
            let _ = tx.send(event).await;
        };

        tokio::join!(resolve_user, fetch_books);
    })
}

/// Like `book_id`, resolving the session user first when it is not known yet
pub fn spawn_like(
    workflow: Arc<LikeWorkflow>,
    api: Arc<dyn BooksApi>,
    session: Session,
    user: Option<User>,
    book_id: BookId,
    tx: mpsc::Sender<AppEvent>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let user = match user {
            Some(user) => user,
            None => match session.resolve(api.as_ref()).await {
                Ok(user) => {
                    let _ = tx.send(AppEvent::SessionReady(user.clone())).await;
                    user
                }
                Err(e) => {
                    tracing::error!("Could not resolve user {}: {}", session.user_id(), e);
                    let _ = tx.send(AppEvent::SessionFailed).await;
                    return;
                }
            },
        };

        let result = workflow.like(book_id, &user).await;
        let _ = tx.send(AppEvent::like_result(book_id, result)).await;
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiError, HttpBooksApi};
    use crate::demo::DemoBackend;
    use crate::like::{LikeMode, LikeOutcome};
    use crate::models::{Book, LikersPatch, UserId};
    use async_trait::async_trait;
    use std::time::Duration;

    async fn setup() -> (DemoBackend, Arc<dyn BooksApi>) {
        let backend = DemoBackend::spawn_seeded().await.unwrap();
        let api = HttpBooksApi::new(backend.base_url(), Duration::from_secs(5)).unwrap();
        (backend, Arc::new(api))
    }

    /// Drain the two bootstrap events, in whatever order they arrived
    async fn bootstrap_events(rx: &mut mpsc::Receiver<AppEvent>) -> (AppEvent, AppEvent) {
        let mut session = None;
        let mut books = None;
        for _ in 0..2 {
            match rx.recv().await {
                Some(event @ (AppEvent::SessionReady(_) | AppEvent::SessionFailed)) => {
                    session = Some(event)
                }
                Some(event @ (AppEvent::BooksLoaded(_) | AppEvent::BooksFailed(_))) => {
                    books = Some(event)
                }
                other => panic!("unexpected bootstrap event {:?}", other),
            }
        }
        (session.unwrap(), books.unwrap())
    }

    #[tokio::test]
    async fn bootstrap_reports_user_and_books() {
        let (_backend, api) = setup().await;
        let (tx, mut rx) = mpsc::channel(8);

        spawn_bootstrap(api, Session::new(1), tx).await.unwrap();

        match bootstrap_events(&mut rx).await {
            (AppEvent::SessionReady(user), AppEvent::BooksLoaded(books)) => {
                assert_eq!(user.id, 1);
                assert_eq!(books.len(), 4);
            }
            other => panic!("expected user and books, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn bootstrap_with_unknown_user_still_loads_books() {
        let (_backend, api) = setup().await;
        let (tx, mut rx) = mpsc::channel(8);

        spawn_bootstrap(api, Session::new(404), tx).await.unwrap();

        let (session, books) = bootstrap_events(&mut rx).await;
        assert!(matches!(session, AppEvent::SessionFailed));
        assert!(matches!(books, AppEvent::BooksLoaded(_)));
    }

    /// Demo backend behind a user lookup that takes `delay`
    struct SlowUserApi {
        inner: Arc<dyn BooksApi>,
        delay: Duration,
    }

    #[async_trait]
    impl BooksApi for SlowUserApi {
        async fn list_books(&self) -> Result<Vec<Book>, ApiError> {
            self.inner.list_books().await
        }

        async fn get_book(&self, id: BookId) -> Result<Book, ApiError> {
            self.inner.get_book(id).await
        }

        async fn get_user(&self, id: UserId) -> Result<User, ApiError> {
            tokio::time::sleep(self.delay).await;
            self.inner.get_user(id).await
        }

        async fn patch_likers(&self, id: BookId, patch: &LikersPatch) -> Result<Book, ApiError> {
            self.inner.patch_likers(id, patch).await
        }

        async fn add_liker(&self, id: BookId, user: &User) -> Result<Book, ApiError> {
            self.inner.add_liker(id, user).await
        }
    }

    #[tokio::test]
    async fn slow_user_lookup_does_not_delay_books() {
        let (_backend, inner) = setup().await;
        let api = Arc::new(SlowUserApi {
            inner,
            delay: Duration::from_secs(3),
        });
        let (tx, mut rx) = mpsc::channel(8);

        let bootstrap = spawn_bootstrap(api, Session::new(1), tx);

        let first = tokio::time::timeout(Duration::from_secs(1), rx.recv())
            .await
            .expect("books should arrive before the user lookup finishes");
        assert!(matches!(first, Some(AppEvent::BooksLoaded(books)) if books.len() == 4));

        bootstrap.await.unwrap();
        assert!(matches!(rx.recv().await, Some(AppEvent::SessionReady(_))));
    }

    #[tokio::test]
    async fn like_without_user_resolves_session_first() {
        let (_backend, api) = setup().await;
        let workflow = Arc::new(LikeWorkflow::new(api.clone(), LikeMode::CheckThenPatch));
        let (tx, mut rx) = mpsc::channel(8);

        // Book 3 starts with no likers in the seed
        spawn_like(workflow, api, Session::new(1), None, 3, tx)
            .await
            .unwrap();

        assert!(matches!(rx.recv().await, Some(AppEvent::SessionReady(_))));
        match rx.recv().await {
            Some(AppEvent::LikeFinished(LikeOutcome::Liked { book_id, user })) => {
                assert_eq!(book_id, 3);
                assert_eq!(user.id, 1);
            }
            other => panic!("expected Liked, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn like_failure_becomes_an_event() {
        let (_backend, api) = setup().await;
        let workflow = Arc::new(LikeWorkflow::new(api.clone(), LikeMode::CheckThenPatch));
        let (tx, mut rx) = mpsc::channel(8);

        spawn_like(
            workflow,
            api,
            Session::new(1),
            Some(User::new(1, "pouros")),
            500,
            tx,
        )
        .await
        .unwrap();

        assert!(matches!(
            rx.recv().await,
            Some(AppEvent::LikeFailed { book_id: 500, .. })
        ));
    }
}
