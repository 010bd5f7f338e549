//! Cache provider configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Top-level cache configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Cache provider type: `"memory"` or `"redis"`.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Deadline for a single key-value round trip in milliseconds.
    #[serde(default = "default_operation_timeout")]
    pub operation_timeout_ms: u64,
    /// Per-entity TTLs for cached reads.
    #[serde(default)]
    pub ttl: CacheTtlConfig,
    /// Redis-specific cache configuration.
    #[serde(default)]
    pub redis: RedisCacheConfig,
    /// In-memory cache configuration.
    #[serde(default)]
    pub memory: MemoryCacheConfig,
}

impl CacheConfig {
    /// Returns the per-operation deadline.
    pub fn operation_timeout(&self) -> Duration {
        Duration::from_millis(self.operation_timeout_ms)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            operation_timeout_ms: default_operation_timeout(),
            ttl: CacheTtlConfig::default(),
            redis: RedisCacheConfig::default(),
            memory: MemoryCacheConfig::default(),
        }
    }
}

/// Fixed TTLs per cached entity class.
///
/// Mutations never invalidate these entries, so each value is also the
/// maximum staleness a reader can observe for that class.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheTtlConfig {
    /// TTL of the full book list.
    #[serde(default = "default_books_ttl")]
    pub books_seconds: u64,
    /// TTL of a user's favorite books.
    #[serde(default = "default_favorites_ttl")]
    pub favorites_seconds: u64,
    /// TTL of a user's profile.
    #[serde(default = "default_profile_ttl")]
    pub profile_seconds: u64,
}

impl CacheTtlConfig {
    /// TTL of the full book list.
    pub fn books(&self) -> Duration {
        Duration::from_secs(self.books_seconds)
    }

    /// TTL of a user's favorite books.
    pub fn favorites(&self) -> Duration {
        Duration::from_secs(self.favorites_seconds)
    }

    /// TTL of a user's profile.
    pub fn profile(&self) -> Duration {
        Duration::from_secs(self.profile_seconds)
    }
}

impl Default for CacheTtlConfig {
    fn default() -> Self {
        Self {
            books_seconds: default_books_ttl(),
            favorites_seconds: default_favorites_ttl(),
            profile_seconds: default_profile_ttl(),
        }
    }
}

/// Redis cache backend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedisCacheConfig {
    /// Redis connection URL.
    #[serde(default = "default_redis_url")]
    pub url: String,
    /// Key prefix for all cache keys.
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,
}

impl Default for RedisCacheConfig {
    fn default() -> Self {
        Self {
            url: default_redis_url(),
            key_prefix: default_key_prefix(),
        }
    }
}

/// In-memory cache backend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryCacheConfig {
    /// Maximum number of entries in the cache.
    #[serde(default = "default_max_capacity")]
    pub max_capacity: u64,
}

impl Default for MemoryCacheConfig {
    fn default() -> Self {
        Self {
            max_capacity: default_max_capacity(),
        }
    }
}

fn default_provider() -> String {
    "memory".to_string()
}

fn default_operation_timeout() -> u64 {
    2000
}

fn default_books_ttl() -> u64 {
    30
}

fn default_favorites_ttl() -> u64 {
    30
}

fn default_profile_ttl() -> u64 {
    10
}

fn default_redis_url() -> String {
    "redis://localhost:6379".to_string()
}

fn default_key_prefix() -> String {
    "library:".to_string()
}

fn default_max_capacity() -> u64 {
    10000
}
