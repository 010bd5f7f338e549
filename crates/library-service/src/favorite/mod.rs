//! Per-user favorite books.

pub mod service;

pub use service::FavoriteService;
