//! Book catalogue service.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use library_cache::{CacheAsideReader, keys};
use library_core::error::AppError;
use library_core::result::AppResult;
use library_database::BookStore;
use library_entity::book::{Book, BookUpdate, NewBook};

/// Reads and maintains the book catalogue.
///
/// The full list is served through the cache; every other operation reads
/// or writes the store directly.
#[derive(Debug, Clone)]
pub struct BookService {
    books: Arc<dyn BookStore>,
    reader: CacheAsideReader,
    list_ttl: Duration,
}

impl BookService {
    /// Creates a new book service.
    pub fn new(books: Arc<dyn BookStore>, reader: CacheAsideReader, list_ttl: Duration) -> Self {
        Self {
            books,
            reader,
            list_ttl,
        }
    }

    /// Every book, possibly up to one TTL stale.
    pub async fn list_all(&self) -> AppResult<Vec<Book>> {
        self.reader
            .read(&keys::books_all(), self.list_ttl, || self.load_all())
            .await
    }

    async fn load_all(&self) -> AppResult<Vec<Book>> {
        let books = self.books.list_all().await?;
        if books.is_empty() {
            return Err(AppError::not_found("No books found"));
        }
        Ok(books)
    }

    /// One book by identifier.
    pub async fn get(&self, book_id: i64) -> AppResult<Book> {
        self.books
            .find_by_id(book_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Book {book_id} not found")))
    }

    /// Books whose title contains `title`.
    pub async fn search(&self, title: &str) -> AppResult<Vec<Book>> {
        let title = title.trim();
        if title.is_empty() {
            return Err(AppError::validation("Search title is required"));
        }
        let books = self.books.search_by_title(title).await?;
        if books.is_empty() {
            return Err(AppError::not_found(format!("No books match '{title}'")));
        }
        Ok(books)
    }

    /// Books of one genre.
    pub async fn by_genre(&self, genre_id: i32) -> AppResult<Vec<Book>> {
        let books = self.books.find_by_genre(genre_id).await?;
        if books.is_empty() {
            return Err(AppError::not_found(format!("No books in genre {genre_id}")));
        }
        Ok(books)
    }

    /// Adds a book and returns it as stored.
    pub async fn create(&self, book: NewBook) -> AppResult<Book> {
        if book.title.trim().is_empty() || book.author.trim().is_empty() {
            return Err(AppError::validation("Title and author are required"));
        }
        if book.isbn.trim().is_empty() {
            return Err(AppError::validation("ISBN is required"));
        }
        if book.quantity < 0 {
            return Err(AppError::validation("Quantity cannot be negative"));
        }

        let book_id = self.books.create(&book).await?;
        info!(book_id, isbn = %book.isbn, "Book added");
        self.get(book_id).await
    }

    /// Applies a partial update and returns the book as stored.
    pub async fn update(&self, book_id: i64, update: BookUpdate) -> AppResult<Book> {
        if update.is_empty() {
            return Err(AppError::validation("Nothing to update"));
        }
        if update.quantity.is_some_and(|q| q < 0) {
            return Err(AppError::validation("Quantity cannot be negative"));
        }

        let existing = self.get(book_id).await?;
        let merged = update.merged_with(&existing);
        if !self.books.update(&merged).await? {
            return Err(AppError::not_found(format!("Book {book_id} not found")));
        }

        info!(book_id, "Book updated");
        self.get(book_id).await
    }

    /// Removes a book.
    pub async fn delete(&self, book_id: i64) -> AppResult<()> {
        if !self.books.delete(book_id).await? {
            return Err(AppError::not_found(format!("Book {book_id} not found")));
        }
        info!(book_id, "Book deleted");
        Ok(())
    }
}
