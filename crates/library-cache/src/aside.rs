//! Cache-aside reads.
//!
//! A read checks the cache, falls back to the source of truth on a miss and
//! writes the result back with a fixed TTL. Writes elsewhere in the
//! application never touch these entries; staleness is bounded only by the
//! TTL of each entry class.
//!
//! Concurrent misses on one key may both run their loader and both write
//! the entry. The last write wins and both snapshots are equally valid.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use library_core::error::{AppError, ErrorKind};
use library_core::result::AppResult;
use library_core::traits::cache::CacheProvider;

/// Read-through helper over a [`CacheProvider`].
#[derive(Debug, Clone)]
pub struct CacheAsideReader {
    cache: Arc<dyn CacheProvider>,
}

impl CacheAsideReader {
    /// Create a reader over the given key-value store.
    pub fn new(cache: Arc<dyn CacheProvider>) -> Self {
        Self { cache }
    }

    /// Return the value cached at `key`, or load, cache and return it.
    ///
    /// * A cache transport error fails the read; it is never taken for a miss.
    /// * A cached payload that does not deserialize fails the read with
    ///   [`ErrorKind::Serialization`].
    /// * Loader errors are returned unchanged.
    /// * Failing to write the loaded value back is logged and ignored.
    pub async fn read<T, F, Fut>(&self, key: &str, ttl: Duration, loader: F) -> AppResult<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = AppResult<T>>,
    {
        if let Some(payload) = self.cache.get(key).await? {
            debug!(key, "Cache hit");
            return serde_json::from_str(&payload).map_err(|e| {
                AppError::with_source(
                    ErrorKind::Serialization,
                    format!("Cached entry '{key}' could not be decoded"),
                    e,
                )
            });
        }

        debug!(key, "Cache miss, loading from store");
        let value = loader().await?;

        match serde_json::to_string(&value) {
            Ok(payload) => {
                if let Err(e) = self.cache.set(key, &payload, ttl).await {
                    warn!(key, error = %e, "Failed to populate cache entry");
                }
            }
            Err(e) => warn!(key, error = %e, "Failed to encode value for cache"),
        }

        Ok(value)
    }
}
