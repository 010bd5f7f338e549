//! Core traits defined in `library-core` and implemented by other crates.

pub mod cache;

pub use cache::CacheProvider;
