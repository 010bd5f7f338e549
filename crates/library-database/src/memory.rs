//! In-process implementation of every store trait.
//!
//! Backs unit and integration tests that exercise services and the HTTP
//! layer without a PostgreSQL instance. Mirrors the constraints the schema
//! enforces: unique emails, unique ISBNs, unique favorites and known genres.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;

use library_core::error::AppError;
use library_core::result::AppResult;
use library_entity::book::{Book, FavoriteBook, NewBook};
use library_entity::borrowing::{Borrowing, NewBorrowing};
use library_entity::user::{NewUser, Profile, User};

use crate::store::{
    BookStore, BorrowingStore, CredentialStore, FavoriteStore, ProfileStore, StoreHealth,
};

#[derive(Debug, Default)]
struct State {
    users: Vec<User>,
    genres: HashMap<i32, String>,
    books: Vec<Book>,
    favorites: Vec<(i64, i64, i64)>,
    borrowings: Vec<Borrowing>,
    last_id: i64,
}

impl State {
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }
}

/// All relational data held in one mutex.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty store that knows the given genres.
    pub fn with_genres(genres: &[(i32, &str)]) -> Self {
        let store = Self::new();
        store.lock().genres = genres
            .iter()
            .map(|(id, name)| (*id, name.to_string()))
            .collect();
        store
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        // A panic while holding the lock leaves plain data behind; keep serving it.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl CredentialStore for MemoryStore {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self
            .lock()
            .users
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        Ok(self.lock().users.iter().find(|u| u.id == id).cloned())
    }

    async fn create(&self, user: &NewUser) -> AppResult<User> {
        let mut state = self.lock();
        if state
            .users
            .iter()
            .any(|u| u.email.eq_ignore_ascii_case(&user.email))
        {
            return Err(AppError::conflict("Email already registered"));
        }
        let created = User {
            id: state.next_id(),
            username: user.username.clone(),
            email: user.email.clone(),
            password_hash: user.password_hash.clone(),
            role_id: user.role.id(),
            role: user.role,
            created_at: Utc::now(),
        };
        state.users.push(created.clone());
        Ok(created)
    }

    async fn update_password(&self, id: i64, password_hash: &str) -> AppResult<()> {
        let mut state = self.lock();
        let user = state
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| AppError::not_found(format!("User {id} not found")))?;
        user.password_hash = password_hash.to_string();
        Ok(())
    }
}

#[async_trait]
impl ProfileStore for MemoryStore {
    async fn find_profile(&self, user_id: i64) -> AppResult<Option<Profile>> {
        Ok(self
            .lock()
            .users
            .iter()
            .find(|u| u.id == user_id)
            .map(Profile::from))
    }

    async fn email_taken_by_other(&self, email: &str, user_id: i64) -> AppResult<bool> {
        Ok(self
            .lock()
            .users
            .iter()
            .any(|u| u.id != user_id && u.email.eq_ignore_ascii_case(email)))
    }

    async fn update_profile(&self, user_id: i64, username: &str, email: &str) -> AppResult<()> {
        let mut state = self.lock();
        let user = state
            .users
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or_else(|| AppError::not_found(format!("User {user_id} not found")))?;
        user.username = username.to_string();
        user.email = email.to_string();
        Ok(())
    }
}

#[async_trait]
impl BookStore for MemoryStore {
    async fn list_all(&self) -> AppResult<Vec<Book>> {
        Ok(self.lock().books.clone())
    }

    async fn find_by_id(&self, book_id: i64) -> AppResult<Option<Book>> {
        Ok(self
            .lock()
            .books
            .iter()
            .find(|b| b.book_id == book_id)
            .cloned())
    }

    async fn search_by_title(&self, title: &str) -> AppResult<Vec<Book>> {
        let needle = title.to_lowercase();
        Ok(self
            .lock()
            .books
            .iter()
            .filter(|b| b.title.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    async fn find_by_genre(&self, genre_id: i32) -> AppResult<Vec<Book>> {
        Ok(self
            .lock()
            .books
            .iter()
            .filter(|b| b.genre_id == genre_id)
            .cloned()
            .collect())
    }

    async fn create(&self, book: &NewBook) -> AppResult<i64> {
        let mut state = self.lock();
        let genre = state
            .genres
            .get(&book.genre_id)
            .cloned()
            .ok_or_else(|| AppError::validation(format!("Unknown genre {}", book.genre_id)))?;
        if state.books.iter().any(|b| b.isbn == book.isbn) {
            return Err(AppError::conflict("ISBN already exists"));
        }
        let book_id = state.next_id();
        state.books.push(Book {
            book_id,
            title: book.title.clone(),
            author: book.author.clone(),
            cover: book.cover.clone(),
            isbn: book.isbn.clone(),
            publication_year: book.publication_year,
            genre_id: book.genre_id,
            genre,
            quantity: book.quantity,
        });
        Ok(book_id)
    }

    async fn update(&self, book: &Book) -> AppResult<bool> {
        let mut state = self.lock();
        let genre = state
            .genres
            .get(&book.genre_id)
            .cloned()
            .ok_or_else(|| AppError::validation(format!("Unknown genre {}", book.genre_id)))?;
        match state.books.iter_mut().find(|b| b.book_id == book.book_id) {
            Some(stored) => {
                stored.title = book.title.clone();
                stored.author = book.author.clone();
                stored.cover = book.cover.clone();
                stored.genre_id = book.genre_id;
                stored.genre = genre;
                stored.quantity = book.quantity;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, book_id: i64) -> AppResult<bool> {
        let mut state = self.lock();
        if state.borrowings.iter().any(|b| b.book_id == book_id) {
            return Err(AppError::conflict("Book still has borrowing records"));
        }
        let before = state.books.len();
        state.books.retain(|b| b.book_id != book_id);
        state.favorites.retain(|(_, _, fav_book)| *fav_book != book_id);
        Ok(state.books.len() < before)
    }
}

#[async_trait]
impl FavoriteStore for MemoryStore {
    async fn list_for_user(&self, user_id: i64) -> AppResult<Vec<FavoriteBook>> {
        let state = self.lock();
        Ok(state
            .favorites
            .iter()
            .filter(|(_, owner, _)| *owner == user_id)
            .filter_map(|(favorite_id, owner, book_id)| {
                state
                    .books
                    .iter()
                    .find(|b| b.book_id == *book_id)
                    .map(|book| FavoriteBook {
                        favorite_id: *favorite_id,
                        user_id: *owner,
                        book_id: *book_id,
                        title: book.title.clone(),
                        author: book.author.clone(),
                    })
            })
            .collect())
    }

    async fn add(&self, user_id: i64, book_id: i64) -> AppResult<i64> {
        let mut state = self.lock();
        if state
            .favorites
            .iter()
            .any(|(_, owner, book)| *owner == user_id && *book == book_id)
        {
            return Err(AppError::conflict("Book is already a favorite"));
        }
        let favorite_id = state.next_id();
        state.favorites.push((favorite_id, user_id, book_id));
        Ok(favorite_id)
    }

    async fn remove(&self, user_id: i64, book_id: i64) -> AppResult<bool> {
        let mut state = self.lock();
        let before = state.favorites.len();
        state
            .favorites
            .retain(|(_, owner, book)| !(*owner == user_id && *book == book_id));
        Ok(state.favorites.len() < before)
    }
}

#[async_trait]
impl BorrowingStore for MemoryStore {
    async fn create(&self, borrowing: &NewBorrowing) -> AppResult<Borrowing> {
        let mut state = self.lock();
        let created = Borrowing {
            borrow_id: state.next_id(),
            book_id: borrowing.book_id,
            user_id: borrowing.user_id,
            borrow_date: borrowing.borrow_date,
            return_date: borrowing.return_date,
        };
        state.borrowings.push(created.clone());
        Ok(created)
    }

    async fn list_all(&self) -> AppResult<Vec<Borrowing>> {
        Ok(self.lock().borrowings.clone())
    }
}

#[async_trait]
impl StoreHealth for MemoryStore {
    async fn ping(&self) -> AppResult<bool> {
        Ok(true)
    }
}
