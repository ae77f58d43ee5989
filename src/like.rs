//! Like workflow
//!
//! Liking book B as user U:
//!
//! ```text
//! check-then-patch (default)          atomic
//! ─────────────────────────           ──────
//! GET /books/B  -> likers             POST /books/B/likers  U
//! U in likers?  -> AlreadyLiked         409 -> AlreadyLiked
//! PATCH /books/B {users: likers + U}    2xx -> Liked
//!   2xx -> Liked
//! ```
//!
//! Likes for the same book are serialized through a per-book async lock, so
//! two presses from this client cannot both pass the duplicate check. The
//! atomic mode moves the check to the server and closes the race across
//! clients as well.
//!
//! The book and the user are always explicit arguments; the workflow holds no
//! "current book" or "current user".

use crate::api::{ApiError, BooksApi};
use crate::models::{BookId, LikersPatch, User};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// How a like is submitted to the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LikeMode {
    /// Read the liker list, then PATCH the full list back
    #[default]
    CheckThenPatch,
    /// Single `POST /books/:id/likers` call
    Atomic,
}

impl LikeMode {
    /// Parse from config/env; unknown values fall back to the default
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().replace('_', "-").as_str() {
            "atomic" => Self::Atomic,
            _ => Self::CheckThenPatch,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CheckThenPatch => "check-then-patch",
            Self::Atomic => "atomic",
        }
    }
}

/// Result of a like that did not fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LikeOutcome {
    /// The user was added; the caller should render their liker tag
    Liked { book_id: BookId, user: User },
    /// The user already likes this book; nothing was changed
    AlreadyLiked { book_id: BookId, user: User },
}

/// Notice shown when a duplicate like is attempted
pub const ALREADY_LIKED_NOTICE: &str = "You already liked this book!";

/// Which step of the workflow failed
#[derive(Debug, Error)]
pub enum LikeError {
    #[error("could not fetch book {book_id}: {source}")]
    FetchBook {
        book_id: BookId,
        #[source]
        source: ApiError,
    },

    #[error("could not update likers of book {book_id}: {source}")]
    PatchLikers {
        book_id: BookId,
        #[source]
        source: ApiError,
    },

    #[error("could not add liker to book {book_id}: {source}")]
    AddLiker {
        book_id: BookId,
        #[source]
        source: ApiError,
    },
}

/// Runs likes against a [`BooksApi`]
pub struct LikeWorkflow {
    api: Arc<dyn BooksApi>,
    mode: LikeMode,
    /// One lock per book, created on first use
    book_locks: Mutex<HashMap<BookId, Arc<tokio::sync::Mutex<()>>>>,
}

impl LikeWorkflow {
    pub fn new(api: Arc<dyn BooksApi>, mode: LikeMode) -> Self {
        Self {
            api,
            mode,
            book_locks: Mutex::new(HashMap::new()),
        }
    }

    pub fn mode(&self) -> LikeMode {
        self.mode
    }

    fn lock_for(&self, book_id: BookId) -> Arc<tokio::sync::Mutex<()>> {
        let mut locks = self
            .book_locks
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        locks.entry(book_id).or_default().clone()
    }

    /// Like `book_id` as `user`
    pub async fn like(&self, book_id: BookId, user: &User) -> Result<LikeOutcome, LikeError> {
        let lock = self.lock_for(book_id);
        let _guard = lock.lock().await;

        let outcome = match self.mode {
            LikeMode::CheckThenPatch => self.check_then_patch(book_id, user).await,
            LikeMode::Atomic => self.atomic(book_id, user).await,
        };

        match &outcome {
            Ok(LikeOutcome::Liked { .. }) => {
                tracing::info!("{} liked book {}", user.username, book_id);
            }
            Ok(LikeOutcome::AlreadyLiked { .. }) => {
                tracing::info!("{} already likes book {}", user.username, book_id);
            }
            Err(e) => tracing::error!("Like failed: {}", e),
        }

        outcome
    }

    async fn check_then_patch(
        &self,
        book_id: BookId,
        user: &User,
    ) -> Result<LikeOutcome, LikeError> {
        let book = self
            .api
            .get_book(book_id)
            .await
            .map_err(|source| LikeError::FetchBook { book_id, source })?;

        if book.is_liked_by(user) {
            return Ok(LikeOutcome::AlreadyLiked {
                book_id,
                user: user.clone(),
            });
        }

        let patch = LikersPatch::appending(&book.users, user);

        self.api
            .patch_likers(book_id, &patch)
            .await
            .map_err(|source| LikeError::PatchLikers { book_id, source })?;

        Ok(LikeOutcome::Liked {
            book_id,
            user: user.clone(),
        })
    }

    async fn atomic(&self, book_id: BookId, user: &User) -> Result<LikeOutcome, LikeError> {
        match self.api.add_liker(book_id, user).await {
            Ok(_) => Ok(LikeOutcome::Liked {
                book_id,
                user: user.clone(),
            }),
            Err(e) if e.is_conflict() => Ok(LikeOutcome::AlreadyLiked {
                book_id,
                user: user.clone(),
            }),
            Err(source) => Err(LikeError::AddLiker { book_id, source }),
        }
    }
}
