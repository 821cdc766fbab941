//! Column sorting for the book table.
//!
//! Sort state is a single (key, direction) pair: clicking the active column
//! flips direction, clicking another column selects it ascending. Sorting is
//! stable, so rows with equal keys keep their relative order.

use serde::{Deserialize, Serialize};

use crate::entities::Book;

/// Sortable table columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortKey {
    Id,
    Title,
    Authors,
    Rating,
    Price,
}

/// Current sort key and direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SortState {
    pub key: Option<SortKey>,
    pub ascending: bool,
}

impl Default for SortState {
    fn default() -> Self {
        Self {
            key: None,
            ascending: true,
        }
    }
}

impl SortState {
    /// Header click: same column flips direction, new column starts ascending.
    pub fn toggle(&mut self, key: SortKey) {
        if self.key == Some(key) {
            self.ascending = !self.ascending;
        } else {
            self.key = Some(key);
            self.ascending = true;
        }
    }

    /// Direction for `key` if it is the active column.
    pub fn direction(&self, key: SortKey) -> Option<bool> {
        (self.key == Some(key)).then_some(self.ascending)
    }
}

/// Re-sort the collection in place.
///
/// Text columns compare case-insensitively; numeric columns compare by value
/// (`total_cmp`, so the comparator is a total order).
pub fn sort_books(books: &mut [Book], key: SortKey, ascending: bool) {
    books.sort_by(|a, b| {
        let ord = match key {
            SortKey::Id => a.id.cmp(&b.id),
            SortKey::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
            SortKey::Authors => a.authors.to_lowercase().cmp(&b.authors.to_lowercase()),
            SortKey::Rating => a.rating.total_cmp(&b.rating),
            SortKey::Price => a.price.total_cmp(&b.price),
        };
        if ascending { ord } else { ord.reverse() }
    });
}
