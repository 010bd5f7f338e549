//! Book catalogue reads and maintenance.

pub mod service;

pub use service::BookService;
