//! Favorite book handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use library_entity::book::FavoriteBook;

use crate::dto::request::AddFavoriteRequest;
use crate::dto::response::{ApiResponse, CreatedResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, FavoriteHolders, ValidatedJson};
use crate::state::AppState;

/// GET /api/favorites
pub async fn list_favorites(
    State(state): State<AppState>,
    auth: AuthUser<FavoriteHolders>,
) -> Result<Json<ApiResponse<Vec<FavoriteBook>>>, ApiError> {
    let favorites = state.favorite_service.list(auth.context()).await?;
    Ok(Json(ApiResponse::ok(favorites)))
}

/// POST /api/favorites
pub async fn add_favorite(
    State(state): State<AppState>,
    auth: AuthUser<FavoriteHolders>,
    ValidatedJson(req): ValidatedJson<AddFavoriteRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CreatedResponse>>), ApiError> {
    let id = state
        .favorite_service
        .add(auth.context(), req.book_id)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(CreatedResponse { id })),
    ))
}

/// DELETE /api/favorites/{book_id}
pub async fn remove_favorite(
    State(state): State<AppState>,
    auth: AuthUser<FavoriteHolders>,
    Path(book_id): Path<i64>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state
        .favorite_service
        .remove(auth.context(), book_id)
        .await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Favorite removed",
    ))))
}
