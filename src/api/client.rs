//! REST client for the books backend

use super::{ApiError, BooksApi};
use crate::models::{Book, BookId, LikersPatch, User, UserId};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// reqwest-backed implementation of [`BooksApi`]
#[derive(Debug, Clone)]
pub struct HttpBooksApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBooksApi {
    /// Create a client for `base_url` (e.g. `http://localhost:3000`)
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(4)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a request and decode a JSON body, mapping every failure to `ApiError`
    async fn send_json<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        url: String,
    ) -> Result<T, ApiError> {
        let response = request.send().await.map_err(|source| ApiError::Transport {
            url: url.clone(),
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status { status, url });
        }

        response
            .json::<T>()
            .await
            .map_err(|source| ApiError::Decode { url, source })
    }
}

#[async_trait]
impl BooksApi for HttpBooksApi {
    async fn list_books(&self) -> Result<Vec<Book>, ApiError> {
        let url = self.url("/books");
        tracing::debug!("GET {}", url);
        self.send_json(self.client.get(&url), url).await
    }

    async fn get_book(&self, id: BookId) -> Result<Book, ApiError> {
        let url = self.url(&format!("/books/{}", id));
        tracing::debug!("GET {}", url);
        self.send_json(self.client.get(&url), url).await
    }

    async fn get_user(&self, id: UserId) -> Result<User, ApiError> {
        let url = self.url(&format!("/users/{}", id));
        tracing::debug!("GET {}", url);
        self.send_json(self.client.get(&url), url).await
    }

    async fn patch_likers(&self, id: BookId, patch: &LikersPatch) -> Result<Book, ApiError> {
        let url = self.url(&format!("/books/{}", id));
        tracing::debug!("PATCH {} ({} likers)", url, patch.users.len());
        self.send_json(self.client.patch(&url).json(patch), url)
            .await
    }

    async fn add_liker(&self, id: BookId, user: &User) -> Result<Book, ApiError> {
        let url = self.url(&format!("/books/{}/likers", id));
        tracing::debug!("POST {} (user {})", url, user.id);
        self.send_json(self.client.post(&url).json(user), url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::DemoBackend;

    fn client_for(backend: &DemoBackend) -> HttpBooksApi {
        HttpBooksApi::new(backend.base_url(), Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let api = HttpBooksApi::new("http://localhost:3000/", Duration::from_secs(1)).unwrap();
        assert_eq!(api.url("/books"), "http://localhost:3000/books");
    }

    #[tokio::test]
    async fn lists_and_fetches_books() {
        let backend = DemoBackend::spawn_seeded().await.unwrap();
        let api = client_for(&backend);

        let books = api.list_books().await.unwrap();
        assert!(!books.is_empty());

        let first = api.get_book(books[0].id).await.unwrap();
        assert_eq!(first, books[0]);
    }

    #[tokio::test]
    async fn missing_book_is_a_status_error() {
        let backend = DemoBackend::spawn_seeded().await.unwrap();
        let api = client_for(&backend);

        let err = api.get_book(9_999).await.unwrap_err();
        assert_eq!(err.status(), Some(reqwest::StatusCode::NOT_FOUND));
    }

    #[tokio::test]
    async fn unreachable_backend_is_a_transport_error() {
        // Grab a free port, then close it so nothing is listening there
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let api = HttpBooksApi::new(format!("http://{}", addr), Duration::from_secs(2)).unwrap();
        let err = api.list_books().await.unwrap_err();
        assert!(matches!(err, ApiError::Transport { .. }));
    }

    #[tokio::test]
    async fn add_liker_twice_conflicts() {
        let backend = DemoBackend::spawn_seeded().await.unwrap();
        let api = client_for(&backend);
        let user = api.get_user(1).await.unwrap();
        let book = api
            .list_books()
            .await
            .unwrap()
            .into_iter()
            .find(|b| !b.is_liked_by(&user))
            .unwrap();

        let updated = api.add_liker(book.id, &user).await.unwrap();
        assert!(updated.is_liked_by(&user));

        let err = api.add_liker(book.id, &user).await.unwrap_err();
        assert!(err.is_conflict());
    }
}
