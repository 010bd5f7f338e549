//! Custom Axum extractors.

pub mod auth;
pub mod json;

pub use auth::{AnyRole, AuthUser, Borrowers, FavoriteHolders, ManagerOnly, RolePolicy, Staff};
pub use json::ValidatedJson;
