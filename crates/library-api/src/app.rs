//! Application builder: wires stores, cache and auth into services and the
//! router.

use std::sync::Arc;

use axum::Router;
use tracing::info;

use library_auth::{
    AuthorizationGate, JwtDecoder, JwtEncoder, PasswordHasher, PasswordValidator,
    RevocationRegistry,
};
use library_cache::{CacheAsideReader, CacheManager};
use library_core::config::AppConfig;
use library_core::result::AppResult;
use library_core::traits::cache::CacheProvider;
use library_database::{
    BookStore, BorrowingStore, CredentialStore, FavoriteStore, ProfileStore, StoreHealth,
};
use library_service::{
    AuthService, BookService, BorrowingService, FavoriteService, ProfileService,
};

use crate::router::build_router;
use crate::state::AppState;

/// The relational stores the services run against.
#[derive(Debug, Clone)]
pub struct Backends {
    /// User credentials.
    pub credentials: Arc<dyn CredentialStore>,
    /// User profiles.
    pub profiles: Arc<dyn ProfileStore>,
    /// Book catalogue.
    pub books: Arc<dyn BookStore>,
    /// Favorite books.
    pub favorites: Arc<dyn FavoriteStore>,
    /// Borrowings.
    pub borrowings: Arc<dyn BorrowingStore>,
    /// Reachability probe.
    pub health: Arc<dyn StoreHealth>,
}

impl Backends {
    /// Use one store for every role.
    pub fn single<S>(store: Arc<S>) -> Self
    where
        S: CredentialStore
            + ProfileStore
            + BookStore
            + FavoriteStore
            + BorrowingStore
            + StoreHealth,
    {
        Self {
            credentials: store.clone(),
            profiles: store.clone(),
            books: store.clone(),
            favorites: store.clone(),
            borrowings: store.clone(),
            health: store,
        }
    }
}

/// Constructs every service and the authorization gate.
///
/// Fails if the signing key is absent.
pub fn build_state(
    config: AppConfig,
    backends: Backends,
    cache: Arc<CacheManager>,
) -> AppResult<AppState> {
    let kv: Arc<dyn CacheProvider> = cache.clone();
    let ttl = &config.cache.ttl;

    // ── Auth ─────────────────────────────────────────────────
    let encoder = Arc::new(JwtEncoder::new(&config.auth)?);
    let decoder = JwtDecoder::new(&config.auth)?;
    // Revocations live outside the size-bounded read cache.
    let revocations: Arc<dyn CacheProvider> = Arc::new(cache.durable());
    let registry = RevocationRegistry::new(revocations, &config.auth);
    let gate = Arc::new(AuthorizationGate::new(decoder, registry.clone()));

    // ── Services ─────────────────────────────────────────────
    let reader = CacheAsideReader::new(Arc::clone(&kv));
    let auth_service = Arc::new(AuthService::new(
        backends.credentials,
        encoder,
        Arc::new(registry),
        Arc::new(PasswordHasher::new()),
        Arc::new(PasswordValidator::new(&config.auth)),
    ));
    let book_service = Arc::new(BookService::new(
        Arc::clone(&backends.books),
        reader.clone(),
        ttl.books(),
    ));
    let favorite_service = Arc::new(FavoriteService::new(
        backends.favorites,
        Arc::clone(&backends.books),
        reader.clone(),
        ttl.favorites(),
    ));
    let profile_service = Arc::new(ProfileService::new(
        backends.profiles,
        reader,
        ttl.profile(),
    ));
    let borrowing_service = Arc::new(BorrowingService::new(
        backends.borrowings,
        backends.books,
        config.borrowing.fine_per_day,
    ));

    info!(
        cache_provider = %config.cache.provider,
        books_ttl_s = ttl.books_seconds,
        favorites_ttl_s = ttl.favorites_seconds,
        profile_ttl_s = ttl.profile_seconds,
        "Application state assembled"
    );

    Ok(AppState {
        config: Arc::new(config),
        cache,
        store_health: backends.health,
        gate,
        auth_service,
        book_service,
        favorite_service,
        profile_service,
        borrowing_service,
    })
}

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    build_router(state)
}
