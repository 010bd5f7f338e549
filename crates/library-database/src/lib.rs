//! # library-database
//!
//! PostgreSQL connection management, the relational store traits consumed
//! by the service layer, and their sqlx implementations.

pub mod connection;
#[cfg(any(test, feature = "memory-store"))]
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use store::{BookStore, BorrowingStore, CredentialStore, FavoriteStore, ProfileStore, StoreHealth};
