//! Book catalogue handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

use library_entity::book::Book;

use crate::dto::request::{CreateBookRequest, SearchBooksQuery, UpdateBookRequest};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, ManagerOnly, Staff, ValidatedJson};
use crate::state::AppState;

/// GET /api/books
pub async fn list_books(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<Book>>>, ApiError> {
    let books = state.book_service.list_all().await?;
    Ok(Json(ApiResponse::ok(books)))
}

/// GET /api/books/{id}
pub async fn get_book(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(book_id): Path<i64>,
) -> Result<Json<ApiResponse<Book>>, ApiError> {
    let book = state.book_service.get(book_id).await?;
    Ok(Json(ApiResponse::ok(book)))
}

/// GET /api/books/search?title=
pub async fn search_books(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<SearchBooksQuery>,
) -> Result<Json<ApiResponse<Vec<Book>>>, ApiError> {
    let books = state.book_service.search(&query.title).await?;
    Ok(Json(ApiResponse::ok(books)))
}

/// GET /api/books/genre/{genre_id}
pub async fn books_by_genre(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(genre_id): Path<i32>,
) -> Result<Json<ApiResponse<Vec<Book>>>, ApiError> {
    let books = state.book_service.by_genre(genre_id).await?;
    Ok(Json(ApiResponse::ok(books)))
}

/// POST /api/books
pub async fn create_book(
    State(state): State<AppState>,
    _auth: AuthUser<Staff>,
    ValidatedJson(req): ValidatedJson<CreateBookRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Book>>), ApiError> {
    let book = state.book_service.create(req.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(book))))
}

/// PUT /api/books/{id}
pub async fn update_book(
    State(state): State<AppState>,
    _auth: AuthUser<ManagerOnly>,
    Path(book_id): Path<i64>,
    ValidatedJson(req): ValidatedJson<UpdateBookRequest>,
) -> Result<Json<ApiResponse<Book>>, ApiError> {
    let book = state.book_service.update(book_id, req.into()).await?;
    Ok(Json(ApiResponse::ok(book)))
}

/// DELETE /api/books/{id}
pub async fn delete_book(
    State(state): State<AppState>,
    _auth: AuthUser<Staff>,
    Path(book_id): Path<i64>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.book_service.delete(book_id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(format!(
        "Book {book_id} deleted"
    )))))
}
