//! Books backend API
//!
//! `BooksApi` is the seam between the like workflow / bootstrap and the
//! network. `HttpBooksApi` is the real REST client; tests plug in fakes.
//!
//! # Endpoints
//!
//! ```text
//! GET   /books               -> [Book]
//! GET   /books/:id           -> Book
//! GET   /users/:id           -> User
//! PATCH /books/:id           {users: [User]} -> Book
//! POST  /books/:id/likers    User -> Book | 409 if already liked
//! ```

mod client;
mod error;

pub use client::HttpBooksApi;
pub use error::ApiError;

use crate::models::{Book, BookId, LikersPatch, User, UserId};
use async_trait::async_trait;

/// Operations the front end needs from the backend
#[async_trait]
pub trait BooksApi: Send + Sync {
    /// Fetch the whole book collection
    async fn list_books(&self) -> Result<Vec<Book>, ApiError>;

    /// Fetch the current state of one book
    async fn get_book(&self, id: BookId) -> Result<Book, ApiError>;

    /// Fetch one user
    async fn get_user(&self, id: UserId) -> Result<User, ApiError>;

    /// Replace a book's liker list
    async fn patch_likers(&self, id: BookId, patch: &LikersPatch) -> Result<Book, ApiError>;

    /// Add one liker in a single server-side step
    ///
    /// Fails with a 409 status when the user already likes the book.
    async fn add_liker(&self, id: BookId, user: &User) -> Result<Book, ApiError>;
}
