//! Borrowing entities and overdue computation.

pub mod model;

pub use model::{Borrowing, BorrowingRecord, NewBorrowing, Overdue};
