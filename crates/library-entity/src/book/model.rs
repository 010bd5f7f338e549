//! Book entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A catalogue entry joined with its genre name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Book {
    /// Unique book identifier.
    pub book_id: i64,
    /// Title.
    pub title: String,
    /// Author name.
    pub author: String,
    /// Cover image location.
    pub cover: String,
    /// ISBN.
    pub isbn: String,
    /// Year of publication.
    pub publication_year: i32,
    /// Identifier of the book's genre.
    pub genre_id: i32,
    /// Genre name resolved from `genres`.
    pub genre: String,
    /// Copies held by the library.
    pub quantity: i32,
}

/// Data required to add a book to the catalogue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBook {
    /// Title.
    pub title: String,
    /// Author name.
    pub author: String,
    /// Cover image location.
    pub cover: String,
    /// Identifier of the genre.
    pub genre_id: i32,
    /// ISBN.
    pub isbn: String,
    /// Year of publication.
    pub publication_year: i32,
    /// Copies held by the library.
    pub quantity: i32,
}

/// Partial update of a book. Missing, blank or zero fields keep their
/// current value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookUpdate {
    /// New title.
    #[serde(default)]
    pub title: Option<String>,
    /// New author.
    #[serde(default)]
    pub author: Option<String>,
    /// New cover location.
    #[serde(default)]
    pub cover: Option<String>,
    /// New genre identifier.
    #[serde(default)]
    pub genre_id: Option<i32>,
    /// New quantity.
    #[serde(default)]
    pub quantity: Option<i32>,
}

impl BookUpdate {
    /// Apply this update on top of `existing`, returning the merged book.
    ///
    /// The genre name is carried over unchanged; the store resolves it again
    /// when the row is re-read.
    pub fn merged_with(&self, existing: &Book) -> Book {
        fn text(requested: &Option<String>, current: &str) -> String {
            requested
                .as_deref()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(current)
                .to_string()
        }
        fn number(requested: Option<i32>, current: i32) -> i32 {
            requested.filter(|v| *v != 0).unwrap_or(current)
        }

        Book {
            book_id: existing.book_id,
            title: text(&self.title, &existing.title),
            author: text(&self.author, &existing.author),
            cover: text(&self.cover, &existing.cover),
            isbn: existing.isbn.clone(),
            publication_year: existing.publication_year,
            genre_id: number(self.genre_id, existing.genre_id),
            genre: existing.genre.clone(),
            quantity: number(self.quantity, existing.quantity),
        }
    }

    /// Returns `true` if the update would change nothing.
    pub fn is_empty(&self) -> bool {
        let blank = |v: &Option<String>| v.as_deref().is_none_or(|s| s.trim().is_empty());
        blank(&self.title)
            && blank(&self.author)
            && blank(&self.cover)
            && self.genre_id.is_none_or(|v| v == 0)
            && self.quantity.is_none_or(|v| v == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book() -> Book {
        Book {
            book_id: 9,
            title: "Laskar Pelangi".to_string(),
            author: "Andrea Hirata".to_string(),
            cover: "covers/laskar.jpg".to_string(),
            isbn: "979-3062-79-7".to_string(),
            publication_year: 2005,
            genre_id: 2,
            genre: "Novel".to_string(),
            quantity: 4,
        }
    }

    #[test]
    fn test_merge_keeps_blank_and_zero_fields() {
        let update = BookUpdate {
            title: Some(" ".to_string()),
            author: None,
            cover: Some("covers/new.jpg".to_string()),
            genre_id: Some(0),
            quantity: Some(7),
        };
        let merged = update.merged_with(&book());
        assert_eq!(merged.title, "Laskar Pelangi");
        assert_eq!(merged.author, "Andrea Hirata");
        assert_eq!(merged.cover, "covers/new.jpg");
        assert_eq!(merged.genre_id, 2);
        assert_eq!(merged.quantity, 7);
        assert_eq!(merged.book_id, 9);
    }

    #[test]
    fn test_is_empty() {
        assert!(BookUpdate::default().is_empty());
        assert!(
            BookUpdate {
                title: Some(String::new()),
                quantity: Some(0),
                ..Default::default()
            }
            .is_empty()
        );
        assert!(
            !BookUpdate {
                quantity: Some(1),
                ..Default::default()
            }
            .is_empty()
        );
    }
}
