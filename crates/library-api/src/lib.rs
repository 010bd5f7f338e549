//! # library-api
//!
//! HTTP API layer for the library built on Axum.
//!
//! Provides the REST endpoints under `/api`, the admission extractor that
//! runs the authorization gate, request validation, middleware (logging,
//! CORS, timeouts) and the mapping of domain errors to HTTP responses.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{Backends, build_app, build_state};
pub use error::ApiError;
pub use state::AppState;
