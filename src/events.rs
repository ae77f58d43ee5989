// Events sent from background tasks to the TUI event loop
//
// Fetch chains run in spawned tasks; they never touch the page directly.
// Each finished step becomes an AppEvent that the loop applies.

use crate::like::{LikeError, LikeOutcome};
use crate::models::{Book, BookId, User};

#[derive(Debug)]
pub enum AppEvent {
    /// Initial book collection arrived
    BooksLoaded(Vec<Book>),

    /// Initial fetch failed; the page stays empty
    BooksFailed(String),

    /// The session user was resolved
    SessionReady(User),

    /// Resolving the session user failed (details are logged by the task)
    SessionFailed,

    /// A like finished (liked or duplicate)
    LikeFinished(LikeOutcome),

    /// A like failed at some step
    LikeFailed { book_id: BookId, error: String },
}

impl AppEvent {
    pub fn like_result(book_id: BookId, result: Result<LikeOutcome, LikeError>) -> Self {
        match result {
            Ok(outcome) => AppEvent::LikeFinished(outcome),
            Err(e) => AppEvent::LikeFailed {
                book_id,
                error: e.to_string(),
            },
        }
    }
}
