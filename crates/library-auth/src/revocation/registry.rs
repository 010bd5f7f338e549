//! Key-value backed registry of revoked tokens.
//!
//! Each revoked token is stored under the SHA-256 fingerprint of the token
//! string and expires on its own once the token could no longer verify.
//! Entries are never deleted explicitly.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use tracing::{error, info, warn};

use library_cache::keys;
use library_core::config::AuthConfig;
use library_core::result::AppResult;
use library_core::traits::cache::CacheProvider;

/// Value stored at a revocation key.
const REVOKED_MARKER: &str = "revoked";

/// Set of revoked-but-not-yet-expired tokens.
#[derive(Debug, Clone)]
pub struct RevocationRegistry {
    store: Arc<dyn CacheProvider>,
    floor: Duration,
}

impl RevocationRegistry {
    /// Create a registry over `store` with the configured TTL floor.
    pub fn new(store: Arc<dyn CacheProvider>, config: &AuthConfig) -> Self {
        Self {
            store,
            floor: Duration::from_secs(config.revocation_floor_seconds),
        }
    }

    /// Revoke `token` until it stops verifying, or for at least the floor.
    ///
    /// Expiry is checked in whole seconds and a token is still accepted
    /// during its `exp` second, so the entry outlives `natural_expiry` by
    /// the rest of that second.
    ///
    /// A failed write is returned to the caller; the token then stays valid.
    pub async fn revoke(&self, token: &str, natural_expiry: DateTime<Utc>) -> AppResult<()> {
        let ttl = revocation_ttl(natural_expiry, Utc::now(), self.floor);
        let key = keys::revoked_token(&fingerprint(token));

        self.store
            .set(&key, REVOKED_MARKER, ttl)
            .await
            .inspect_err(|e| error!(error = %e, "Failed to record token revocation"))?;

        info!(ttl_secs = ttl.as_secs(), "Token revoked");
        Ok(())
    }

    /// Returns whether `token` has been revoked.
    ///
    /// A miss means not revoked. Store errors are returned, never read as a miss.
    pub async fn is_revoked(&self, token: &str) -> AppResult<bool> {
        let key = keys::revoked_token(&fingerprint(token));
        match self.store.get(&key).await? {
            None => Ok(false),
            Some(value) if value == REVOKED_MARKER => Ok(true),
            Some(value) => {
                warn!(value = %value, "Unexpected value at revocation key, treating as revoked");
                Ok(true)
            }
        }
    }
}

/// Hex SHA-256 of the token string.
fn fingerprint(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}

/// Time until the first instant the verifier rejects a token expiring at
/// `natural_expiry`, never below `floor`.
fn revocation_ttl(natural_expiry: DateTime<Utc>, now: DateTime<Utc>, floor: Duration) -> Duration {
    let rejected_from_ms = natural_expiry
        .timestamp()
        .saturating_add(1)
        .saturating_mul(1000);
    let remaining_ms = rejected_from_ms.saturating_sub(now.timestamp_millis());
    let remaining = u64::try_from(remaining_ms)
        .map(Duration::from_millis)
        .unwrap_or(Duration::ZERO);
    remaining.max(floor)
}
