//! JWT token creation.

use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::{EncodingKey, Header, encode};

use library_core::config::AuthConfig;
use library_core::error::AppError;
use library_core::result::AppResult;
use library_entity::user::Role;

use super::claims::Claims;

/// Creates HS256-signed access tokens.
#[derive(Clone)]
pub struct JwtEncoder {
    encoding_key: EncodingKey,
    default_ttl: Duration,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("default_ttl", &self.default_ttl)
            .finish_non_exhaustive()
    }
}

/// A freshly signed token and the claims it carries.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    /// Compact JWS string handed to the client.
    pub token: String,
    /// Claims encoded in `token`.
    pub claims: Claims,
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    ///
    /// An absent signing key is a configuration error.
    pub fn new(config: &AuthConfig) -> AppResult<Self> {
        if config.jwt_secret.is_empty() {
            return Err(AppError::configuration("auth.jwt_secret must be set"));
        }
        Ok(Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            default_ttl: Duration::from_secs(config.token_ttl_minutes * 60),
        })
    }

    /// Lifetime of tokens issued at login.
    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Signs claims for `user_id` valid for `ttl` from now.
    ///
    /// `exp` has whole-second precision; a fractional `ttl` is rounded up.
    pub fn issue(&self, user_id: i64, email: &str, role: Role, ttl: Duration) -> AppResult<IssuedToken> {
        let now = Utc::now().timestamp();
        let ttl_secs = ttl.as_secs() + u64::from(ttl.subsec_nanos() > 0);
        let claims = Claims {
            sub: user_id,
            email: email.to_string(),
            role,
            iat: now,
            exp: now.saturating_add(i64::try_from(ttl_secs).unwrap_or(i64::MAX)),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode access token: {e}")))?;

        Ok(IssuedToken { token, claims })
    }
}
