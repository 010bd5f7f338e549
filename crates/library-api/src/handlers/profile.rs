//! Profile handlers.

use axum::Json;
use axum::extract::State;

use library_entity::user::Profile;

use crate::dto::request::UpdateProfileRequest;
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// GET /api/profile
pub async fn get_profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Profile>>, ApiError> {
    let profile = state.profile_service.get(auth.user_id).await?;
    Ok(Json(ApiResponse::ok(profile)))
}

/// PUT /api/profile
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<UpdateProfileRequest>,
) -> Result<Json<ApiResponse<Profile>>, ApiError> {
    let profile = state
        .profile_service
        .update(auth.user_id, req.into())
        .await?;
    Ok(Json(ApiResponse::ok(profile)))
}
