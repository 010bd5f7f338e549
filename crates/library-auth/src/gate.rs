//! Per-request admission decision.
//!
//! Every protected operation runs the same sequence, evaluated fresh on each
//! request:
//!
//! 1. extract the bearer token from the `Authorization` header
//! 2. verify signature and expiry
//! 3. consult the revocation registry, denying when it cannot answer
//! 4. match the claim's role against the operation's required set
//!
//! Only the first failing step is reported.

use tracing::{debug, warn};

use library_core::error::AppError;
use library_entity::user::{Role, RoleSet};

use crate::jwt::{Claims, JwtDecoder, TokenError};
use crate::revocation::RevocationRegistry;

/// Reason a request was denied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AuthFailure {
    /// No `Authorization` header.
    #[error("missing authorization header")]
    MissingCredentials,
    /// Header present but not of the form `Bearer <token>`.
    #[error("malformed authorization header")]
    MalformedCredentials,
    /// Token failed verification for a reason other than expiry.
    #[error("invalid token: {0}")]
    InvalidToken(TokenError),
    /// Token is past its natural expiry.
    #[error("token has expired")]
    ExpiredToken,
    /// Token was revoked before its natural expiry.
    #[error("token has been revoked")]
    Revoked,
    /// The revocation registry could not be consulted.
    #[error("token revocation status could not be determined")]
    Indeterminate,
    /// Authenticated, but the role is not in the required set.
    #[error("role {role} is not permitted, requires one of: {required}")]
    Forbidden {
        /// Role carried by the token.
        role: Role,
        /// Roles the operation admits.
        required: RoleSet,
    },
}

impl AuthFailure {
    /// Returns `true` if the caller is authenticated but lacks the role.
    pub fn is_forbidden(&self) -> bool {
        matches!(self, Self::Forbidden { .. })
    }
}

impl From<TokenError> for AuthFailure {
    fn from(e: TokenError) -> Self {
        match e {
            TokenError::Expired => Self::ExpiredToken,
            other => Self::InvalidToken(other),
        }
    }
}

impl From<AuthFailure> for AppError {
    fn from(failure: AuthFailure) -> Self {
        if failure.is_forbidden() {
            AppError::forbidden(failure.to_string())
        } else {
            AppError::unauthorized(failure.to_string())
        }
    }
}

/// An admitted request: the verified claims and the token they came from.
#[derive(Debug, Clone)]
pub struct Admission {
    /// Verified claims.
    pub claims: Claims,
    /// The presented token, kept for revocation at logout.
    pub token: String,
}

/// Composes verification, revocation and role matching.
#[derive(Debug, Clone)]
pub struct AuthorizationGate {
    decoder: JwtDecoder,
    registry: RevocationRegistry,
}

impl AuthorizationGate {
    /// Create a gate over an explicitly constructed decoder and registry.
    pub fn new(decoder: JwtDecoder, registry: RevocationRegistry) -> Self {
        Self { decoder, registry }
    }

    /// Decide whether a request carrying `authorization` may run an
    /// operation that admits `required`.
    pub async fn admit(
        &self,
        authorization: Option<&str>,
        required: RoleSet,
    ) -> Result<Admission, AuthFailure> {
        let result = self.evaluate(authorization, required).await;
        match &result {
            Ok(admission) => debug!(
                user_id = admission.claims.sub,
                role = %admission.claims.role,
                "Request admitted"
            ),
            Err(reason) => warn!(reason = %reason, "Request denied"),
        }
        result
    }

    async fn evaluate(
        &self,
        authorization: Option<&str>,
        required: RoleSet,
    ) -> Result<Admission, AuthFailure> {
        let token = bearer_token(authorization)?;
        let claims = self.decoder.verify(token)?;

        match self.registry.is_revoked(token).await {
            Ok(false) => {}
            Ok(true) => return Err(AuthFailure::Revoked),
            Err(e) => {
                warn!(error = %e, "Revocation registry unavailable");
                return Err(AuthFailure::Indeterminate);
            }
        }

        if !required.contains(claims.role) {
            return Err(AuthFailure::Forbidden {
                role: claims.role,
                required,
            });
        }

        Ok(Admission {
            claims,
            token: token.to_string(),
        })
    }
}

/// Extract the token from a `Bearer <token>` header value.
pub fn bearer_token(authorization: Option<&str>) -> Result<&str, AuthFailure> {
    let header = authorization.ok_or(AuthFailure::MissingCredentials)?;
    let (scheme, token) = header
        .trim()
        .split_once(' ')
        .ok_or(AuthFailure::MalformedCredentials)?;

    if !scheme.eq_ignore_ascii_case("Bearer") {
        return Err(AuthFailure::MalformedCredentials);
    }

    let token = token.trim();
    if token.is_empty() || token.contains(char::is_whitespace) {
        return Err(AuthFailure::MalformedCredentials);
    }
    Ok(token)
}
