//! Key-value manager that dispatches to the configured provider.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::info;

use library_core::config::CacheConfig;
use library_core::deadline::bounded;
use library_core::error::AppError;
use library_core::result::AppResult;
use library_core::traits::cache::CacheProvider;

/// Wraps the configured provider and bounds every call by a deadline.
///
/// The provider is selected at construction time based on configuration.
/// Besides the size-bounded read cache it carries a durable store for
/// entries that must survive until their TTL, such as token revocations.
#[derive(Debug, Clone)]
pub struct CacheManager {
    inner: Arc<dyn CacheProvider>,
    durable: Arc<dyn CacheProvider>,
    operation_timeout: Duration,
}

impl CacheManager {
    /// Create a new cache manager from configuration.
    pub async fn new(config: &CacheConfig) -> AppResult<Self> {
        let (inner, durable): (Arc<dyn CacheProvider>, Arc<dyn CacheProvider>) =
            match config.provider.as_str() {
                #[cfg(feature = "redis-backend")]
                "redis" => {
                    info!("Initializing Redis cache provider");
                    let client = crate::redis::RedisClient::connect(&config.redis).await?;
                    let provider: Arc<dyn CacheProvider> =
                        Arc::new(crate::redis::RedisCacheProvider::new(client));
                    (provider.clone(), provider)
                }
                #[cfg(feature = "memory")]
                "memory" => {
                    info!("Initializing in-memory cache provider");
                    let reads: Arc<dyn CacheProvider> =
                        Arc::new(crate::memory::MemoryCacheProvider::new(&config.memory));
                    let durable: Arc<dyn CacheProvider> =
                        Arc::new(crate::memory::MemoryCacheProvider::unbounded());
                    (reads, durable)
                }
                other => {
                    return Err(AppError::configuration(format!(
                        "Unknown cache provider: '{other}'. Supported: memory, redis"
                    )));
                }
            };

        Ok(Self {
            inner,
            durable,
            operation_timeout: config.operation_timeout(),
        })
    }

    /// Create a cache manager from an existing provider, used for both
    /// the read cache and the durable store.
    pub fn from_provider(provider: Arc<dyn CacheProvider>, operation_timeout: Duration) -> Self {
        Self {
            inner: provider.clone(),
            durable: provider,
            operation_timeout,
        }
    }

    /// The store for entries that must not be evicted before their TTL,
    /// bounded by the same deadline as the read cache.
    pub fn durable(&self) -> CacheManager {
        Self {
            inner: self.durable.clone(),
            durable: self.durable.clone(),
            operation_timeout: self.operation_timeout,
        }
    }
}

#[async_trait]
impl CacheProvider for CacheManager {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        bounded(self.operation_timeout, "cache.get", self.inner.get(key)).await
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()> {
        bounded(self.operation_timeout, "cache.set", self.inner.set(key, value, ttl)).await
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        bounded(self.operation_timeout, "cache.delete", self.inner.delete(key)).await
    }

    async fn expire(&self, key: &str, ttl: Duration) -> AppResult<bool> {
        bounded(self.operation_timeout, "cache.expire", self.inner.expire(key, ttl)).await
    }

    async fn health_check(&self) -> AppResult<bool> {
        bounded(self.operation_timeout, "cache.health_check", self.inner.health_check()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use library_core::error::ErrorKind;

    /// Provider whose reads never complete.
    #[derive(Debug)]
    struct Stalled;

    #[async_trait]
    impl CacheProvider for Stalled {
        async fn get(&self, _key: &str) -> AppResult<Option<String>> {
            std::future::pending().await
        }
        async fn set(&self, _key: &str, _value: &str, _ttl: Duration) -> AppResult<()> {
            std::future::pending().await
        }
        async fn delete(&self, _key: &str) -> AppResult<()> {
            Ok(())
        }
        async fn expire(&self, _key: &str, _ttl: Duration) -> AppResult<bool> {
            Ok(false)
        }
        async fn health_check(&self) -> AppResult<bool> {
            Ok(true)
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_stalled_backend_times_out() {
        let manager = CacheManager::from_provider(Arc::new(Stalled), Duration::from_millis(500));
        let err = manager.get("books:all").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Timeout);
        let err = manager
            .set("books:all", "[]", Duration::from_secs(30))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Timeout);
    }

    #[tokio::test]
    async fn test_durable_store_survives_read_cache_eviction() {
        let config = CacheConfig {
            provider: "memory".to_string(),
            memory: library_core::config::MemoryCacheConfig { max_capacity: 100 },
            ..CacheConfig::default()
        };
        let manager = CacheManager::new(&config).await.unwrap();
        let durable = manager.durable();

        durable
            .set("blacklist:abc", "revoked", Duration::from_secs(86_400))
            .await
            .unwrap();
        for i in 0..2000 {
            manager
                .set(&format!("profile:{i}"), "{}", Duration::from_secs(10))
                .await
                .unwrap();
        }

        assert_eq!(
            durable.get("blacklist:abc").await.unwrap(),
            Some("revoked".to_string())
        );
        assert_eq!(manager.get("blacklist:abc").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_unknown_provider_rejected() {
        let config = CacheConfig {
            provider: "memcached".to_string(),
            ..CacheConfig::default()
        };
        let err = CacheManager::new(&config).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Configuration);
    }
}
