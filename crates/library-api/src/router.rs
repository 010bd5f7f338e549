//! Route definitions for the library HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`. Role
//! requirements live on the handlers' `AuthUser` policies.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{delete, get, post, put},
};
use tower_http::compression::CompressionLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let server = state.config.server.clone();

    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(profile_routes())
        .merge(book_routes())
        .merge(favorite_routes())
        .merge(borrowing_routes())
        .merge(health_routes());

    Router::new()
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(server.max_body_bytes))
        .layer(TimeoutLayer::new(server.request_timeout()))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(middleware::cors::build_cors_layer(&server.cors))
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Account endpoints
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/logout", post(handlers::auth::logout))
        .route("/auth/password", put(handlers::auth::change_password))
}

/// Profile of the caller
fn profile_routes() -> Router<AppState> {
    Router::new().route(
        "/profile",
        get(handlers::profile::get_profile).put(handlers::profile::update_profile),
    )
}

/// Book catalogue
fn book_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/books",
            get(handlers::books::list_books).post(handlers::books::create_book),
        )
        .route("/books/search", get(handlers::books::search_books))
        .route("/books/genre/{genre_id}", get(handlers::books::books_by_genre))
        .route(
            "/books/{id}",
            get(handlers::books::get_book)
                .put(handlers::books::update_book)
                .delete(handlers::books::delete_book),
        )
}

/// Favorite books of the caller
fn favorite_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/favorites",
            get(handlers::favorites::list_favorites).post(handlers::favorites::add_favorite),
        )
        .route(
            "/favorites/{book_id}",
            delete(handlers::favorites::remove_favorite),
        )
}

/// Borrowing records
fn borrowing_routes() -> Router<AppState> {
    Router::new().route(
        "/borrowings",
        get(handlers::borrowings::borrowing_report).post(handlers::borrowings::borrow_book),
    )
}

/// Health check (no auth required)
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
