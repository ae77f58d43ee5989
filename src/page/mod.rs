// Page model - the element tree the TUI draws
//
// The page holds two containers: the book list (one entry per book) and the
// show panel (one detail panel per book, hidden by default). Elements are
// addressable by book id or by element id (`book-{id}`, `likers-book-{id}`).
//
// Only the TUI event loop mutates a page. Network tasks report back through
// the event channel and the loop applies the result here.

pub mod render;

use crate::models::{Book, BookId, UserId};

/// Entry in the book list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEntry {
    pub book_id: BookId,
    pub title: String,
}

/// A user shown in a book's liker list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LikerTag {
    pub user_id: UserId,
    pub username: String,
}

/// Full book information, hidden until its list entry is selected
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailPanel {
    pub book_id: BookId,
    pub title: String,
    pub img_url: String,
    pub description: String,
    pub likers: Vec<LikerTag>,
    pub button_label: &'static str,
    pub visible: bool,
}

impl DetailPanel {
    /// Element id of the panel (`book-{id}`)
    pub fn element_id(&self) -> String {
        format!("book-{}", self.book_id)
    }

    /// Element id of the liker list (`likers-book-{id}`)
    pub fn likers_element_id(&self) -> String {
        format!("likers-book-{}", self.book_id)
    }
}

/// Parse `book-{id}` back to a book id
pub fn book_id_from_element_id(element_id: &str) -> Option<BookId> {
    element_id.strip_prefix("book-")?.parse().ok()
}

/// The list panel and the show panel
#[derive(Debug, Default)]
pub struct Page {
    list: Vec<ListEntry>,
    panels: Vec<DetailPanel>,
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one list entry and one hidden detail panel per book
    pub fn display_books(&mut self, books: &[Book]) {
        for book in books {
            self.list.push(render::book_list_item(book));
            self.panels.push(render::book_panel(book));
        }
        tracing::debug!("Displayed {} books", books.len());
    }

    pub fn list_entries(&self) -> &[ListEntry] {
        &self.list
    }

    pub fn panels(&self) -> &[DetailPanel] {
        &self.panels
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn panel(&self, book_id: BookId) -> Option<&DetailPanel> {
        self.panels.iter().find(|p| p.book_id == book_id)
    }

    fn panel_mut(&mut self, book_id: BookId) -> Option<&mut DetailPanel> {
        self.panels.iter_mut().find(|p| p.book_id == book_id)
    }

    /// Look a panel up by its element id (`book-{id}`)
    #[allow(dead_code)] // Addressing for callers holding an element id
    pub fn panel_by_element_id(&self, element_id: &str) -> Option<&DetailPanel> {
        self.panel(book_id_from_element_id(element_id)?)
    }

    /// The panel currently shown, if any
    pub fn visible_panel(&self) -> Option<&DetailPanel> {
        self.panels().iter().find(|p| p.visible)
    }

    /// Hide every panel, then show the one for `book_id`
    ///
    /// Returns false when no panel exists for `book_id`; everything stays
    /// hidden in that case.
    pub fn show_panel(&mut self, book_id: BookId) -> bool {
        for panel in &mut self.panels {
            panel.visible = false;
        }

        match self.panel_mut(book_id) {
            Some(panel) => {
                panel.visible = true;
                tracing::debug!("Showing {}", panel.element_id());
                true
            }
            None => {
                tracing::warn!("No detail panel for book {}", book_id);
                false
            }
        }
    }

    /// Append a liker tag to a book's liker list
    ///
    /// Returns false when the book has no panel on this page.
    pub fn append_liker(&mut self, book_id: BookId, tag: LikerTag) -> bool {
        match self.panel_mut(book_id) {
            Some(panel) => {
                tracing::debug!("Appending {} to {}", tag.username, panel.likers_element_id());
                panel.likers.push(tag);
                true
            }
            None => {
                tracing::warn!("Liked book {} is not on the page", book_id);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::User;

    fn books(n: u64) -> Vec<Book> {
        (1..=n)
            .map(|id| Book {
                id,
                title: format!("Book {}", id),
                description: String::new(),
                img_url: String::new(),
                users: Vec::new(),
            })
            .collect()
    }

    #[test]
    fn n_books_make_n_entries_and_n_panels() {
        let mut page = Page::new();
        page.display_books(&books(5));

        assert_eq!(page.list_entries().len(), 5);
        assert_eq!(page.panels().len(), 5);
        for id in 1..=5 {
            assert!(page.list_entries().iter().any(|e| e.book_id == id));
            assert_eq!(page.panel(id).map(|p| p.book_id), Some(id));
            let element_id = format!("book-{}", id);
            assert!(page.panel_by_element_id(&element_id).is_some());
        }
        assert!(page.visible_panel().is_none());
    }

    #[test]
    fn selecting_shows_exactly_one_panel() {
        let mut page = Page::new();
        page.display_books(&books(4));

        assert!(page.show_panel(2));
        assert!(page.show_panel(3));

        let visible: Vec<_> = page.panels().iter().filter(|p| p.visible).collect();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].book_id, 3);
    }

    #[test]
    fn selecting_unknown_book_hides_everything() {
        let mut page = Page::new();
        page.display_books(&books(2));
        page.show_panel(1);

        assert!(!page.show_panel(99));
        assert!(page.visible_panel().is_none());
    }

    #[test]
    fn append_liker_targets_one_panel() {
        let mut page = Page::new();
        page.display_books(&books(2));

        let tag = render::liker_tag(&User::new(1, "a"));
        assert!(page.append_liker(2, tag.clone()));
        assert!(!page.append_liker(9, tag));

        assert!(page.panel(1).unwrap().likers.is_empty());
        assert_eq!(page.panel(2).unwrap().likers[0].username, "a");
    }

    #[test]
    fn element_id_parsing() {
        assert_eq!(book_id_from_element_id("book-12"), Some(12));
        assert_eq!(book_id_from_element_id("likers-book-12"), None);
        assert_eq!(book_id_from_element_id("book-x"), None);
    }
}
