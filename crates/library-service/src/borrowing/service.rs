//! Borrowing service.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use library_core::error::AppError;
use library_core::result::AppResult;
use library_database::{BookStore, BorrowingStore};
use library_entity::borrowing::{Borrowing, BorrowingRecord, NewBorrowing};

use crate::context::RequestContext;

/// A request to lend a book.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BorrowRequest {
    /// Book to lend.
    pub book_id: i64,
    /// Borrower. Only honored for managers; everyone else borrows for
    /// themselves.
    #[serde(default)]
    pub user_id: Option<i64>,
    /// Day the book leaves the library.
    pub borrow_date: NaiveDate,
    /// Day the book is due back.
    pub return_date: NaiveDate,
}

/// Records borrowings and reports on lateness.
#[derive(Debug, Clone)]
pub struct BorrowingService {
    borrowings: Arc<dyn BorrowingStore>,
    books: Arc<dyn BookStore>,
    fine_per_day: i64,
}

impl BorrowingService {
    /// Creates a new borrowing service.
    pub fn new(
        borrowings: Arc<dyn BorrowingStore>,
        books: Arc<dyn BookStore>,
        fine_per_day: i64,
    ) -> Self {
        Self {
            borrowings,
            books,
            fine_per_day,
        }
    }

    /// Records that a book was lent.
    pub async fn borrow(&self, ctx: &RequestContext, request: BorrowRequest) -> AppResult<Borrowing> {
        if request.return_date < request.borrow_date {
            return Err(AppError::validation(
                "Return date cannot be before the borrow date",
            ));
        }
        if self.books.find_by_id(request.book_id).await?.is_none() {
            return Err(AppError::not_found(format!(
                "Book {} not found",
                request.book_id
            )));
        }

        let user_id = match request.user_id {
            Some(borrower) if ctx.is_manager() => borrower,
            _ => ctx.user_id,
        };

        let borrowing = self
            .borrowings
            .create(&NewBorrowing {
                book_id: request.book_id,
                user_id,
                borrow_date: request.borrow_date,
                return_date: request.return_date,
            })
            .await?;

        info!(
            borrow_id = borrowing.borrow_id,
            book_id = borrowing.book_id,
            user_id,
            "Book borrowed"
        );
        Ok(borrowing)
    }

    /// Every borrowing with its lateness as of today.
    pub async fn report(&self) -> AppResult<Vec<BorrowingRecord>> {
        self.report_as_of(Utc::now().date_naive()).await
    }

    /// Every borrowing with its lateness as of `today`.
    pub async fn report_as_of(&self, today: NaiveDate) -> AppResult<Vec<BorrowingRecord>> {
        let borrowings = self.borrowings.list_all().await?;
        Ok(borrowings
            .into_iter()
            .map(|b| BorrowingRecord::assess(b, today, self.fine_per_day))
            .collect())
    }
}
