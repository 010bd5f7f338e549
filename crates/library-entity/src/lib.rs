//! # library-entity
//!
//! Domain entity models for the Library School API. Every struct in this
//! crate represents a database row or a domain value object. Database
//! entities additionally derive `sqlx::FromRow`.

pub mod book;
pub mod borrowing;
pub mod user;
