//! Renderer: data -> elements
//!
//! Pure construction. Nothing here touches the network or inserts into a
//! [`Page`](super::Page); callers decide where the element goes.

use super::{DetailPanel, LikerTag, ListEntry};
use crate::models::{Book, User};

/// Label of the like button on every detail panel
pub const LIKE_BUTTON_LABEL: &str = "Like Book";

/// Tag shown in a book's liker list for `user`
pub fn liker_tag(user: &User) -> LikerTag {
    LikerTag {
        user_id: user.id,
        username: user.username.clone(),
    }
}

/// Hidden detail panel for `book`, with one liker tag per current liker
pub fn book_panel(book: &Book) -> DetailPanel {
    DetailPanel {
        book_id: book.id,
        title: book.title.clone(),
        img_url: book.img_url.clone(),
        description: book.description.clone(),
        likers: book.users.iter().map(liker_tag).collect(),
        button_label: LIKE_BUTTON_LABEL,
        visible: false,
    }
}

/// List entry for `book`, carrying its identifier
pub fn book_list_item(book: &Book) -> ListEntry {
    ListEntry {
        book_id: book.id,
        title: book.title.clone(),
    }
}
