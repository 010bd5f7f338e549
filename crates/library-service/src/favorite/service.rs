//! Favorite books service.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use library_cache::{CacheAsideReader, keys};
use library_core::error::AppError;
use library_core::result::AppResult;
use library_database::{BookStore, FavoriteStore};
use library_entity::book::FavoriteBook;

use crate::context::RequestContext;

/// Keeps each user's list of favorite books.
#[derive(Debug, Clone)]
pub struct FavoriteService {
    favorites: Arc<dyn FavoriteStore>,
    books: Arc<dyn BookStore>,
    reader: CacheAsideReader,
    ttl: Duration,
}

impl FavoriteService {
    /// Creates a new favorite service.
    pub fn new(
        favorites: Arc<dyn FavoriteStore>,
        books: Arc<dyn BookStore>,
        reader: CacheAsideReader,
        ttl: Duration,
    ) -> Self {
        Self {
            favorites,
            books,
            reader,
            ttl,
        }
    }

    /// The caller's favorites, cached per user. An empty list is a valid
    /// answer.
    pub async fn list(&self, ctx: &RequestContext) -> AppResult<Vec<FavoriteBook>> {
        let user_id = ctx.user_id;
        self.reader
            .read(&keys::favorite_books(user_id), self.ttl, || {
                self.favorites.list_for_user(user_id)
            })
            .await
    }

    /// Marks a book as one of the caller's favorites.
    pub async fn add(&self, ctx: &RequestContext, book_id: i64) -> AppResult<i64> {
        if self.books.find_by_id(book_id).await?.is_none() {
            return Err(AppError::not_found(format!("Book {book_id} not found")));
        }
        let favorite_id = self.favorites.add(ctx.user_id, book_id).await?;
        info!(user_id = ctx.user_id, book_id, "Favorite added");
        Ok(favorite_id)
    }

    /// Removes a book from the caller's favorites.
    pub async fn remove(&self, ctx: &RequestContext, book_id: i64) -> AppResult<()> {
        if !self.favorites.remove(ctx.user_id, book_id).await? {
            return Err(AppError::not_found(format!(
                "Book {book_id} is not among your favorites"
            )));
        }
        info!(user_id = ctx.user_id, book_id, "Favorite removed");
        Ok(())
    }
}
