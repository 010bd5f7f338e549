//! In-memory key-value provider using the moka crate.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use moka::Expiry;
use moka::future::Cache;

use library_core::config::MemoryCacheConfig;
use library_core::result::AppResult;
use library_core::traits::cache::CacheProvider;

/// A stored value together with the TTL it was written with.
#[derive(Debug, Clone)]
struct Entry {
    value: String,
    ttl: Duration,
}

/// Expires each entry after its own TTL, restarting the clock on overwrite.
struct PerEntryTtl;

impl Expiry<String, Entry> for PerEntryTtl {
    fn expire_after_create(&self, _key: &String, entry: &Entry, _created_at: Instant) -> Option<Duration> {
        Some(entry.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        entry: &Entry,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(entry.ttl)
    }
}

/// In-memory key-value provider using moka.
#[derive(Debug, Clone)]
pub struct MemoryCacheProvider {
    cache: Cache<String, Entry>,
}

impl MemoryCacheProvider {
    /// Create a new in-memory store from configuration.
    pub fn new(config: &MemoryCacheConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.max_capacity)
            .expire_after(PerEntryTtl)
            .build();

        Self { cache }
    }

    /// Create a store with no size bound.
    ///
    /// Entries leave only when their TTL elapses or they are deleted, never
    /// to make room for other keys.
    pub fn unbounded() -> Self {
        let cache = Cache::builder().expire_after(PerEntryTtl).build();

        Self { cache }
    }
}

#[async_trait]
impl CacheProvider for MemoryCacheProvider {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.cache.get(key).await.map(|entry| entry.value))
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()> {
        let entry = Entry {
            value: value.to_string(),
            ttl,
        };
        self.cache.insert(key.to_string(), entry).await;
        Ok(())
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.cache.remove(key).await;
        Ok(())
    }

    async fn expire(&self, key: &str, ttl: Duration) -> AppResult<bool> {
        // moka cannot retarget a live entry, so re-insert it with the new TTL.
        match self.cache.get(key).await {
            Some(entry) => {
                let entry = Entry {
                    value: entry.value,
                    ttl,
                };
                self.cache.insert(key.to_string(), entry).await;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_provider() -> MemoryCacheProvider {
        MemoryCacheProvider::new(&MemoryCacheConfig { max_capacity: 1000 })
    }

    #[tokio::test]
    async fn test_set_get() {
        let provider = make_provider();
        provider
            .set("key1", "value1", Duration::from_secs(60))
            .await
            .unwrap();
        let val = provider.get("key1").await.unwrap();
        assert_eq!(val, Some("value1".to_string()));
    }

    #[tokio::test]
    async fn test_missing_key_is_clean_miss() {
        let provider = make_provider();
        assert_eq!(provider.get("absent").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_delete() {
        let provider = make_provider();
        provider
            .set("key2", "value2", Duration::from_secs(60))
            .await
            .unwrap();
        provider.delete("key2").await.unwrap();
        let val = provider.get("key2").await.unwrap();
        assert_eq!(val, None);
    }

    #[tokio::test]
    async fn test_entries_expire_after_their_own_ttl() {
        let provider = make_provider();
        provider
            .set("short", "a", Duration::from_millis(100))
            .await
            .unwrap();
        provider
            .set("long", "b", Duration::from_secs(60))
            .await
            .unwrap();

        tokio::time::sleep(Duration::from_millis(250)).await;

        assert_eq!(provider.get("short").await.unwrap(), None);
        assert_eq!(provider.get("long").await.unwrap(), Some("b".to_string()));
    }

    #[tokio::test]
    async fn test_expire_retargets_ttl() {
        let provider = make_provider();
        provider
            .set("key3", "value3", Duration::from_secs(60))
            .await
            .unwrap();
        assert!(
            provider
                .expire("key3", Duration::from_millis(100))
                .await
                .unwrap()
        );
        assert!(
            !provider
                .expire("absent", Duration::from_secs(1))
                .await
                .unwrap()
        );

        tokio::time::sleep(Duration::from_millis(250)).await;
        assert_eq!(provider.get("key3").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_unbounded_store_keeps_entries_under_pressure() {
        let provider = MemoryCacheProvider::unbounded();
        provider
            .set("blacklist:abc", "revoked", Duration::from_secs(3600))
            .await
            .unwrap();

        for i in 0..2000 {
            provider
                .set(&format!("profile:{i}"), "{}", Duration::from_secs(10))
                .await
                .unwrap();
        }
        provider.cache.run_pending_tasks().await;

        assert_eq!(
            provider.get("blacklist:abc").await.unwrap(),
            Some("revoked".to_string())
        );
    }

    #[tokio::test]
    async fn test_health_check() {
        let provider = make_provider();
        assert!(provider.health_check().await.unwrap());
    }
}
