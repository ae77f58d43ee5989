//! Wire models for the books backend
//!
//! These mirror the JSON the backend serves. They are transient: fetched,
//! rendered into page elements, and dropped.

use serde::{Deserialize, Serialize};

/// Backend identifier for books and users
pub type BookId = u64;
pub type UserId = u64;

/// A user that can like books
///
/// Identity is the `id` alone; the username is display data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
}

impl User {
    pub fn new(id: UserId, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
        }
    }

    /// Same liker as `other` (id equality)
    pub fn same_as(&self, other: &User) -> bool {
        self.id == other.id
    }
}

/// A book with its liker list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub img_url: String,
    /// Users who liked this book, in the order they liked it
    #[serde(default)]
    pub users: Vec<User>,
}

impl Book {
    /// Whether `user` is already in the liker list
    pub fn is_liked_by(&self, user: &User) -> bool {
        self.users.iter().any(|u| u.same_as(user))
    }
}

/// Body of `PATCH /books/:id`: full replacement of the liker list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LikersPatch {
    pub users: Vec<User>,
}

impl LikersPatch {
    /// Existing likers with `user` appended
    pub fn appending(existing: &[User], user: &User) -> Self {
        let mut users = Vec::with_capacity(existing.len() + 1);
        users.extend_from_slice(existing);
        users.push(user.clone());
        Self { users }
    }
}
