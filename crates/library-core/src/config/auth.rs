//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Token signing, revocation, and credential policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for token signing (HMAC-SHA256). Must be non-empty.
    #[serde(default)]
    pub jwt_secret: String,
    /// Lifetime of an issued token in minutes.
    #[serde(default = "default_token_ttl")]
    pub token_ttl_minutes: u64,
    /// Minimum lifetime of a revocation entry in seconds, applied when the
    /// revoked token is already at or past its expiry.
    #[serde(default = "default_revocation_floor")]
    pub revocation_floor_seconds: u64,
    /// Minimum password length.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            token_ttl_minutes: default_token_ttl(),
            revocation_floor_seconds: default_revocation_floor(),
            password_min_length: default_password_min(),
        }
    }
}

fn default_token_ttl() -> u64 {
    24 * 60
}

fn default_revocation_floor() -> u64 {
    60
}

fn default_password_min() -> usize {
    6
}
