//! Borrowing entity model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row of `borrowed_books`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Borrowing {
    /// Unique borrowing identifier.
    pub borrow_id: i64,
    /// Borrowed book.
    pub book_id: i64,
    /// Borrower.
    pub user_id: i64,
    /// Day the book left the library.
    pub borrow_date: NaiveDate,
    /// Day the book is due back.
    pub return_date: NaiveDate,
}

/// Data required to record a borrowing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBorrowing {
    /// Borrowed book.
    pub book_id: i64,
    /// Borrower.
    pub user_id: i64,
    /// Day the book left the library.
    pub borrow_date: NaiveDate,
    /// Day the book is due back.
    pub return_date: NaiveDate,
}

/// Lateness of a borrowing on a given day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Overdue {
    /// Whole days past the return date, zero when not late.
    pub days: i64,
    /// Fine in the smallest currency unit.
    pub fine: i64,
}

impl Overdue {
    /// Compute lateness of a book due on `return_date` as of `today`.
    pub fn compute(return_date: NaiveDate, today: NaiveDate, fine_per_day: i64) -> Self {
        let days = (today - return_date).num_days().max(0);
        Self {
            days,
            fine: days.saturating_mul(fine_per_day),
        }
    }
}

/// A borrowing together with its lateness, as reported to staff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BorrowingRecord {
    /// The stored borrowing.
    pub borrowing: Borrowing,
    /// Lateness as of the report day.
    pub overdue: Overdue,
}

impl BorrowingRecord {
    /// Attach lateness computed for `today`.
    pub fn assess(borrowing: Borrowing, today: NaiveDate, fine_per_day: i64) -> Self {
        let overdue = Overdue::compute(borrowing.return_date, today, fine_per_day);
        Self { borrowing, overdue }
    }
}
