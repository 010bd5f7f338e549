//! sqlx implementations of the relational store traits.

pub mod book;
pub mod borrowing;
pub mod favorite;
pub mod user;

pub use book::BookRepository;
pub use borrowing::BorrowingRepository;
pub use favorite::FavoriteRepository;
pub use user::UserRepository;

use library_core::error::{AppError, ErrorKind};

/// Map a sqlx error, turning unique violations into conflicts.
pub(crate) fn map_db_error(context: &'static str, conflict: &'static str) -> impl Fn(sqlx::Error) -> AppError {
    move |e| {
        let unique = e
            .as_database_error()
            .is_some_and(|db| db.is_unique_violation());
        if unique {
            AppError::with_source(ErrorKind::Conflict, conflict, e)
        } else {
            AppError::with_source(ErrorKind::Database, context, e)
        }
    }
}
