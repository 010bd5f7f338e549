//! Borrowing records and overdue reporting.

pub mod service;

pub use service::{BorrowRequest, BorrowingService};
