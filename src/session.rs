//! Session identity
//!
//! The user who likes books is an explicit part of the session, chosen by
//! config or `--user`, and passed into every like.

use crate::api::{ApiError, BooksApi};
use crate::models::{User, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    user_id: UserId,
}

impl Session {
    pub fn new(user_id: UserId) -> Self {
        Self { user_id }
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Fetch the session user from the backend
    pub async fn resolve(&self, api: &dyn BooksApi) -> Result<User, ApiError> {
        let user = api.get_user(self.user_id).await?;
        tracing::info!("Signed in as {} (id {})", user.username, user.id);
        Ok(user)
    }
}
