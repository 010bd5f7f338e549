//! Borrowing repository implementation.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::PgPool;

use library_core::deadline::bounded;
use library_core::error::{AppError, ErrorKind};
use library_core::result::AppResult;
use library_entity::borrowing::{Borrowing, NewBorrowing};

use crate::connection::DatabasePool;
use crate::store::BorrowingStore;

/// Repository for borrowed books.
#[derive(Debug, Clone)]
pub struct BorrowingRepository {
    pool: PgPool,
    query_timeout: Duration,
}

impl BorrowingRepository {
    /// Create a new borrowing repository.
    pub fn new(db: &DatabasePool) -> Self {
        Self {
            pool: db.pool().clone(),
            query_timeout: db.query_timeout(),
        }
    }
}

#[async_trait]
impl BorrowingStore for BorrowingRepository {
    async fn create(&self, borrowing: &NewBorrowing) -> AppResult<Borrowing> {
        bounded(self.query_timeout, "borrowings.create", async {
            sqlx::query_as::<_, Borrowing>(
                "INSERT INTO borrowed_books (book_id, user_id, borrow_date, return_date) \
                 VALUES ($1, $2, $3, $4) \
                 RETURNING borrow_id, book_id, user_id, borrow_date, return_date",
            )
            .bind(borrowing.book_id)
            .bind(borrowing.user_id)
            .bind(borrowing.borrow_date)
            .bind(borrowing.return_date)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to record borrowing", e))
        })
        .await
    }

    async fn list_all(&self) -> AppResult<Vec<Borrowing>> {
        bounded(self.query_timeout, "borrowings.list_all", async {
            sqlx::query_as::<_, Borrowing>(
                "SELECT borrow_id, book_id, user_id, borrow_date, return_date \
                 FROM borrowed_books ORDER BY borrow_id",
            )
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list borrowings", e))
        })
        .await
    }
}
