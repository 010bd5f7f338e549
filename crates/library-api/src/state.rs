//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use library_auth::AuthorizationGate;
use library_cache::CacheManager;
use library_core::config::AppConfig;
use library_database::StoreHealth;
use library_service::{
    AuthService, BookService, BorrowingService, FavoriteService, ProfileService,
};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// Key-value store (Redis or in-memory)
    pub cache: Arc<CacheManager>,
    /// Relational store reachability probe
    pub store_health: Arc<dyn StoreHealth>,

    // ── Auth ─────────────────────────────────────────────────
    /// Per-request admission
    pub gate: Arc<AuthorizationGate>,

    // ── Services ─────────────────────────────────────────────
    /// Register, login, logout, password changes
    pub auth_service: Arc<AuthService>,
    /// Book catalogue
    pub book_service: Arc<BookService>,
    /// Favorite books
    pub favorite_service: Arc<FavoriteService>,
    /// Profiles
    pub profile_service: Arc<ProfileService>,
    /// Borrowings and overdue report
    pub borrowing_service: Arc<BorrowingService>,
}
