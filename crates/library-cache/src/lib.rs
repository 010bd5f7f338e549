//! # library-cache
//!
//! Key-value providers and the cache-aside read path. Two backends:
//!
//! - **memory**: in-process store using [moka](https://crates.io/crates/moka)
//! - **redis**: Redis-backed store using the [redis](https://crates.io/crates/redis) crate
//!
//! The provider is selected at runtime based on configuration. Every call
//! through [`CacheManager`] is bounded by the configured operation deadline.

pub mod aside;
pub mod keys;
#[cfg(feature = "memory")]
pub mod memory;
pub mod provider;
#[cfg(feature = "redis-backend")]
pub mod redis;

pub use aside::CacheAsideReader;
pub use provider::CacheManager;
