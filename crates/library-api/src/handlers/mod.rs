//! Route handlers organized by domain.

pub mod auth;
pub mod books;
pub mod borrowings;
pub mod favorites;
pub mod health;
pub mod profile;
