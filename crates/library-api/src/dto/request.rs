//! Request DTOs with validation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use library_entity::book::{BookUpdate, NewBook};
use library_entity::user::ProfileUpdate;
use library_service::{BorrowRequest, Registration};

/// Registration request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Display name.
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    /// Login email.
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

impl From<RegisterRequest> for Registration {
    fn from(req: RegisterRequest) -> Self {
        Self {
            username: req.username,
            email: req.email,
            password: req.password,
        }
    }
}

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Login email.
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Password change request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    /// New password.
    #[validate(length(min = 1, message = "New password is required"))]
    pub new_password: String,
}

/// Update profile request. Blank fields keep their value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    /// Display name.
    #[serde(default)]
    #[validate(length(max = 100, message = "Username is too long"))]
    pub username: Option<String>,
    /// Email.
    #[serde(default)]
    pub email: Option<String>,
}

impl From<UpdateProfileRequest> for ProfileUpdate {
    fn from(req: UpdateProfileRequest) -> Self {
        Self {
            username: req.username,
            email: req.email,
        }
    }
}

/// Add book request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateBookRequest {
    /// Title.
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    /// Author.
    #[validate(length(min = 1, message = "Author is required"))]
    pub author: String,
    /// Cover image location.
    #[serde(default)]
    pub cover: String,
    /// Genre identifier.
    #[validate(range(min = 1, message = "Genre is required"))]
    pub genre_id: i32,
    /// ISBN.
    #[validate(length(min = 1, message = "ISBN is required"))]
    pub isbn: String,
    /// Year of publication.
    #[validate(range(min = 0, max = 9999, message = "Publication year is out of range"))]
    pub publication_year: i32,
    /// Copies held.
    #[validate(range(min = 0, message = "Quantity cannot be negative"))]
    pub quantity: i32,
}

impl From<CreateBookRequest> for NewBook {
    fn from(req: CreateBookRequest) -> Self {
        Self {
            title: req.title,
            author: req.author,
            cover: req.cover,
            genre_id: req.genre_id,
            isbn: req.isbn,
            publication_year: req.publication_year,
            quantity: req.quantity,
        }
    }
}

/// Update book request. Missing, blank or zero fields keep their value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateBookRequest {
    /// Title.
    #[serde(default)]
    pub title: Option<String>,
    /// Author.
    #[serde(default)]
    pub author: Option<String>,
    /// Cover image location.
    #[serde(default)]
    pub cover: Option<String>,
    /// Genre identifier.
    #[serde(default)]
    #[validate(range(min = 0, message = "Genre cannot be negative"))]
    pub genre_id: Option<i32>,
    /// Copies held.
    #[serde(default)]
    #[validate(range(min = 0, message = "Quantity cannot be negative"))]
    pub quantity: Option<i32>,
}

impl From<UpdateBookRequest> for BookUpdate {
    fn from(req: UpdateBookRequest) -> Self {
        Self {
            title: req.title,
            author: req.author,
            cover: req.cover,
            genre_id: req.genre_id,
            quantity: req.quantity,
        }
    }
}

/// Book title search parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchBooksQuery {
    /// Fragment of the title.
    #[serde(default)]
    pub title: String,
}

/// Add favorite request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AddFavoriteRequest {
    /// Book to mark.
    #[validate(range(min = 1, message = "Book id is required"))]
    pub book_id: i64,
}

/// Borrow book request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BorrowBookRequest {
    /// Book to lend.
    #[validate(range(min = 1, message = "Book id is required"))]
    pub book_id: i64,
    /// Borrower, honored for managers only.
    #[serde(default)]
    pub user_id: Option<i64>,
    /// Day the book leaves the library.
    pub borrow_date: NaiveDate,
    /// Day the book is due back.
    pub return_date: NaiveDate,
}

impl From<BorrowBookRequest> for BorrowRequest {
    fn from(req: BorrowBookRequest) -> Self {
        Self {
            book_id: req.book_id,
            user_id: req.user_id,
            borrow_date: req.borrow_date,
            return_date: req.return_date,
        }
    }
}
