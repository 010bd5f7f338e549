//! Favorite book repository implementation.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::PgPool;

use library_core::deadline::bounded;
use library_core::error::{AppError, ErrorKind};
use library_core::result::AppResult;
use library_entity::book::FavoriteBook;

use super::map_db_error;
use crate::connection::DatabasePool;
use crate::store::FavoriteStore;

/// Repository for users' favorite books.
#[derive(Debug, Clone)]
pub struct FavoriteRepository {
    pool: PgPool,
    query_timeout: Duration,
}

impl FavoriteRepository {
    /// Create a new favorite repository.
    pub fn new(db: &DatabasePool) -> Self {
        Self {
            pool: db.pool().clone(),
            query_timeout: db.query_timeout(),
        }
    }
}

#[async_trait]
impl FavoriteStore for FavoriteRepository {
    async fn list_for_user(&self, user_id: i64) -> AppResult<Vec<FavoriteBook>> {
        bounded(self.query_timeout, "favorites.list_for_user", async {
            sqlx::query_as::<_, FavoriteBook>(
                "SELECT f.favorite_id, f.user_id, f.book_id, b.title, b.author \
                 FROM favorite_books f JOIN books b ON b.book_id = f.book_id \
                 WHERE f.user_id = $1 ORDER BY f.favorite_id",
            )
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list favorites", e))
        })
        .await
    }

    async fn add(&self, user_id: i64, book_id: i64) -> AppResult<i64> {
        bounded(self.query_timeout, "favorites.add", async {
            sqlx::query_scalar::<_, i64>(
                "INSERT INTO favorite_books (user_id, book_id) VALUES ($1, $2) RETURNING favorite_id",
            )
            .bind(user_id)
            .bind(book_id)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error("Failed to add favorite", "Book is already a favorite"))
        })
        .await
    }

    async fn remove(&self, user_id: i64, book_id: i64) -> AppResult<bool> {
        bounded(self.query_timeout, "favorites.remove", async {
            sqlx::query("DELETE FROM favorite_books WHERE user_id = $1 AND book_id = $2")
                .bind(user_id)
                .bind(book_id)
                .execute(&self.pool)
                .await
                .map(|r| r.rows_affected() > 0)
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to remove favorite", e)
                })
        })
        .await
    }
}
