//! Health check handler.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::warn;

use library_core::traits::cache::CacheProvider;

use crate::dto::response::{ApiResponse, HealthResponse};
use crate::state::AppState;

/// GET /api/health
///
/// Reports reachability of both stores. Answers 503 if either is down.
pub async fn health(
    State(state): State<AppState>,
) -> (StatusCode, Json<ApiResponse<HealthResponse>>) {
    let (database, cache) = tokio::join!(state.store_health.ping(), state.cache.health_check());

    let database = database.unwrap_or_else(|e| {
        warn!(error = %e, "Database health check failed");
        false
    });
    let cache = cache.unwrap_or_else(|e| {
        warn!(error = %e, "Cache health check failed");
        false
    });

    let healthy = database && cache;
    let status = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(ApiResponse::ok(HealthResponse {
            status: if healthy { "ok" } else { "degraded" }.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            database,
            cache,
        })),
    )
}
