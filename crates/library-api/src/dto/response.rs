//! Response DTOs.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use library_entity::borrowing::BorrowingRecord;
use library_entity::user::{Role, User};

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Login response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Bearer token.
    pub access_token: String,
    /// Always `Bearer`.
    pub token_type: String,
    /// Natural expiry of the token.
    pub expires_at: DateTime<Utc>,
    /// User info.
    pub user: UserResponse,
}

/// User summary for responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    /// User ID.
    pub id: i64,
    /// Username.
    pub username: String,
    /// Email.
    pub email: String,
    /// Role.
    pub role: Role,
    /// Registered at.
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            role: user.role,
            created_at: user.created_at,
        }
    }
}

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message.
    pub message: String,
}

impl MessageResponse {
    /// Wraps a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Identifier of a newly created row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedResponse {
    /// New identifier.
    pub id: i64,
}

/// One line of the borrowing report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BorrowingReportEntry {
    /// Borrowing ID.
    pub borrow_id: i64,
    /// Borrowed book.
    pub book_id: i64,
    /// Borrower.
    pub user_id: i64,
    /// Day the book left.
    pub borrow_date: NaiveDate,
    /// Day the book is due.
    pub return_date: NaiveDate,
    /// Days past the due date.
    pub days_overdue: i64,
    /// Fine in the smallest currency unit.
    pub fine: i64,
}

impl From<BorrowingRecord> for BorrowingReportEntry {
    fn from(record: BorrowingRecord) -> Self {
        let b = record.borrowing;
        Self {
            borrow_id: b.borrow_id,
            book_id: b.book_id,
            user_id: b.user_id,
            borrow_date: b.borrow_date,
            return_date: b.return_date,
            days_overdue: record.overdue.days,
            fine: record.overdue.fine,
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `ok` or `degraded`.
    pub status: String,
    /// Version.
    pub version: String,
    /// Relational store reachable.
    pub database: bool,
    /// Key-value store reachable.
    pub cache: bool,
}
