//! # library-core
//!
//! Core crate for the Library School API. Contains the configuration
//! schema, the key-value store trait, request deadlines, and the unified
//! error system.
//!
//! This crate has **no** internal dependencies on other library crates.

pub mod config;
pub mod deadline;
pub mod error;
pub mod result;
pub mod traits;

pub use error::AppError;
pub use result::AppResult;
