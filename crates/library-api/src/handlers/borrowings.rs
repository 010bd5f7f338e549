//! Borrowing handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use library_entity::borrowing::Borrowing;

use crate::dto::request::BorrowBookRequest;
use crate::dto::response::{ApiResponse, BorrowingReportEntry};
use crate::error::ApiError;
use crate::extractors::{AuthUser, Borrowers, Staff, ValidatedJson};
use crate::state::AppState;

/// POST /api/borrowings
pub async fn borrow_book(
    State(state): State<AppState>,
    auth: AuthUser<Borrowers>,
    ValidatedJson(req): ValidatedJson<BorrowBookRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Borrowing>>), ApiError> {
    let borrowing = state
        .borrowing_service
        .borrow(auth.context(), req.into())
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(borrowing))))
}

/// GET /api/borrowings
pub async fn borrowing_report(
    State(state): State<AppState>,
    _auth: AuthUser<Staff>,
) -> Result<Json<ApiResponse<Vec<BorrowingReportEntry>>>, ApiError> {
    let records = state.borrowing_service.report().await?;
    Ok(Json(ApiResponse::ok(
        records.into_iter().map(BorrowingReportEntry::from).collect(),
    )))
}
