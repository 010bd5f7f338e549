//! Book repository implementation.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::PgPool;

use library_core::deadline::bounded;
use library_core::error::{AppError, ErrorKind};
use library_core::result::AppResult;
use library_entity::book::{Book, NewBook};

use super::map_db_error;
use crate::connection::DatabasePool;
use crate::store::BookStore;

const BOOK_SELECT: &str = "SELECT b.book_id, b.title, b.author, b.cover, b.isbn, \
     b.publication_year, b.genre_id, g.genre, b.quantity \
     FROM books b JOIN genres g ON g.genre_id = b.genre_id";

/// Repository for the book catalogue.
#[derive(Debug, Clone)]
pub struct BookRepository {
    pool: PgPool,
    query_timeout: Duration,
}

impl BookRepository {
    /// Create a new book repository.
    pub fn new(db: &DatabasePool) -> Self {
        Self {
            pool: db.pool().clone(),
            query_timeout: db.query_timeout(),
        }
    }
}

#[async_trait]
impl BookStore for BookRepository {
    async fn list_all(&self) -> AppResult<Vec<Book>> {
        let sql = format!("{BOOK_SELECT} ORDER BY b.book_id");
        bounded(self.query_timeout, "books.list_all", async {
            sqlx::query_as::<_, Book>(&sql)
                .fetch_all(&self.pool)
                .await
                .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list books", e))
        })
        .await
    }

    async fn find_by_id(&self, book_id: i64) -> AppResult<Option<Book>> {
        let sql = format!("{BOOK_SELECT} WHERE b.book_id = $1");
        bounded(self.query_timeout, "books.find_by_id", async {
            sqlx::query_as::<_, Book>(&sql)
                .bind(book_id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find book", e))
        })
        .await
    }

    async fn search_by_title(&self, title: &str) -> AppResult<Vec<Book>> {
        let sql = format!("{BOOK_SELECT} WHERE b.title ILIKE $1 ORDER BY b.book_id");
        let pattern = format!("%{}%", escape_like(title));
        bounded(self.query_timeout, "books.search_by_title", async {
            sqlx::query_as::<_, Book>(&sql)
                .bind(&pattern)
                .fetch_all(&self.pool)
                .await
                .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to search books", e))
        })
        .await
    }

    async fn find_by_genre(&self, genre_id: i32) -> AppResult<Vec<Book>> {
        let sql = format!("{BOOK_SELECT} WHERE b.genre_id = $1 ORDER BY b.book_id");
        bounded(self.query_timeout, "books.find_by_genre", async {
            sqlx::query_as::<_, Book>(&sql)
                .bind(genre_id)
                .fetch_all(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to list books by genre", e)
                })
        })
        .await
    }

    async fn create(&self, book: &NewBook) -> AppResult<i64> {
        bounded(self.query_timeout, "books.create", async {
            sqlx::query_scalar::<_, i64>(
                "INSERT INTO books (title, author, cover, genre_id, isbn, publication_year, quantity) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING book_id",
            )
            .bind(&book.title)
            .bind(&book.author)
            .bind(&book.cover)
            .bind(book.genre_id)
            .bind(&book.isbn)
            .bind(book.publication_year)
            .bind(book.quantity)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error("Failed to create book", "ISBN already exists"))
        })
        .await
    }

    async fn update(&self, book: &Book) -> AppResult<bool> {
        bounded(self.query_timeout, "books.update", async {
            sqlx::query(
                "UPDATE books SET title = $1, author = $2, cover = $3, genre_id = $4, quantity = $5 \
                 WHERE book_id = $6",
            )
            .bind(&book.title)
            .bind(&book.author)
            .bind(&book.cover)
            .bind(book.genre_id)
            .bind(book.quantity)
            .bind(book.book_id)
            .execute(&self.pool)
            .await
            .map(|r| r.rows_affected() > 0)
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update book", e))
        })
        .await
    }

    async fn delete(&self, book_id: i64) -> AppResult<bool> {
        bounded(self.query_timeout, "books.delete", async {
            sqlx::query("DELETE FROM books WHERE book_id = $1")
                .bind(book_id)
                .execute(&self.pool)
                .await
                .map(|r| r.rows_affected() > 0)
                .map_err(|e| {
                    let referenced = e
                        .as_database_error()
                        .is_some_and(|db| db.is_foreign_key_violation());
                    if referenced {
                        AppError::with_source(
                            ErrorKind::Conflict,
                            "Book still has borrowing records",
                            e,
                        )
                    } else {
                        AppError::with_source(ErrorKind::Database, "Failed to delete book", e)
                    }
                })
        })
        .await
    }
}

/// Escape `LIKE` wildcards in user input.
fn escape_like(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
