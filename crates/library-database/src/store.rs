//! Relational store traits.
//!
//! Services depend on these traits rather than on the sqlx repositories so
//! that the backing store can be swapped (tests use in-memory fakes).

use std::fmt::Debug;

use async_trait::async_trait;

use library_core::result::AppResult;
use library_entity::book::{Book, FavoriteBook, NewBook};
use library_entity::borrowing::{Borrowing, NewBorrowing};
use library_entity::user::{NewUser, Profile, User};

/// User lookup and credential persistence.
#[async_trait]
pub trait CredentialStore: Send + Sync + Debug + 'static {
    /// Find a user by email (case-insensitive).
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Find a user by primary key.
    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>>;

    /// Insert a user. Fails with a conflict if the email is taken.
    async fn create(&self, user: &NewUser) -> AppResult<User>;

    /// Replace a user's password hash.
    async fn update_password(&self, id: i64, password_hash: &str) -> AppResult<()>;
}

/// Profile reads and writes.
#[async_trait]
pub trait ProfileStore: Send + Sync + Debug + 'static {
    /// Fetch the profile of `user_id`.
    async fn find_profile(&self, user_id: i64) -> AppResult<Option<Profile>>;

    /// Returns `true` if a user other than `user_id` owns `email`.
    async fn email_taken_by_other(&self, email: &str, user_id: i64) -> AppResult<bool>;

    /// Overwrite username and email of `user_id`.
    async fn update_profile(&self, user_id: i64, username: &str, email: &str) -> AppResult<()>;
}

/// Book catalogue persistence.
#[async_trait]
pub trait BookStore: Send + Sync + Debug + 'static {
    /// List every book.
    async fn list_all(&self) -> AppResult<Vec<Book>>;

    /// Find one book.
    async fn find_by_id(&self, book_id: i64) -> AppResult<Option<Book>>;

    /// Books whose title contains `title` (case-insensitive).
    async fn search_by_title(&self, title: &str) -> AppResult<Vec<Book>>;

    /// Books of one genre.
    async fn find_by_genre(&self, genre_id: i32) -> AppResult<Vec<Book>>;

    /// Insert a book and return its identifier.
    async fn create(&self, book: &NewBook) -> AppResult<i64>;

    /// Overwrite the mutable columns of `book`. Returns `false` if no row matched.
    async fn update(&self, book: &Book) -> AppResult<bool>;

    /// Delete a book. Returns `false` if no row matched.
    async fn delete(&self, book_id: i64) -> AppResult<bool>;
}

/// Favorite book persistence.
#[async_trait]
pub trait FavoriteStore: Send + Sync + Debug + 'static {
    /// Favorites of one user.
    async fn list_for_user(&self, user_id: i64) -> AppResult<Vec<FavoriteBook>>;

    /// Mark `book_id` as a favorite of `user_id`. Fails with a conflict if
    /// it already is one.
    async fn add(&self, user_id: i64, book_id: i64) -> AppResult<i64>;

    /// Remove a favorite. Returns `false` if it did not exist.
    async fn remove(&self, user_id: i64, book_id: i64) -> AppResult<bool>;
}

/// Borrowing persistence.
#[async_trait]
pub trait BorrowingStore: Send + Sync + Debug + 'static {
    /// Record a borrowing.
    async fn create(&self, borrowing: &NewBorrowing) -> AppResult<Borrowing>;

    /// Every recorded borrowing.
    async fn list_all(&self) -> AppResult<Vec<Borrowing>>;
}

/// Reachability probe for the relational store.
#[async_trait]
pub trait StoreHealth: Send + Sync + Debug + 'static {
    /// Returns `true` if the store answered.
    async fn ping(&self) -> AppResult<bool>;
}
