//! Favorite book entity.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A book a user marked as favorite, joined with the book's title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct FavoriteBook {
    /// Identifier of the favorite row.
    pub favorite_id: i64,
    /// Owner of the favorite.
    pub user_id: i64,
    /// Favorited book.
    pub book_id: i64,
    /// Title of the favorited book.
    pub title: String,
    /// Author of the favorited book.
    pub author: String,
}
