//! # library-service
//!
//! Business logic service layer for the library API. Each service
//! orchestrates the relational stores, the cache-aside reader and the auth
//! primitives to implement one group of use cases.
//!
//! Services follow constructor injection: all dependencies are provided at
//! construction time via `Arc` references. Mutations write to the relational
//! store only; cached reads go stale for at most one TTL.

pub mod auth;
pub mod book;
pub mod borrowing;
pub mod context;
pub mod favorite;
pub mod profile;

pub use auth::{AuthService, LoginOutcome, Registration};
pub use book::BookService;
pub use borrowing::{BorrowRequest, BorrowingService};
pub use context::RequestContext;
pub use favorite::FavoriteService;
pub use profile::ProfileService;
