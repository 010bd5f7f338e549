//! Account lifecycle: register, login, logout and password changes.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use library_auth::{Admission, JwtEncoder, PasswordHasher, PasswordValidator, RevocationRegistry};
use library_core::error::AppError;
use library_core::result::AppResult;
use library_database::CredentialStore;
use library_entity::user::{NewUser, Role, User};

use crate::context::RequestContext;

/// Handles account creation and credential checks.
#[derive(Debug, Clone)]
pub struct AuthService {
    /// Credential store.
    credentials: Arc<dyn CredentialStore>,
    /// Token signer.
    encoder: Arc<JwtEncoder>,
    /// Revoked token registry.
    registry: Arc<RevocationRegistry>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// Password policy.
    validator: Arc<PasswordValidator>,
}

/// Data for a self-registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Registration {
    /// Display name.
    pub username: String,
    /// Login email.
    pub email: String,
    /// Plain-text password.
    pub password: String,
}

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    /// Signed bearer token.
    pub token: String,
    /// Natural expiry of `token`.
    pub expires_at: DateTime<Utc>,
    /// The authenticated user.
    pub user: User,
}

impl AuthService {
    /// Creates a new auth service.
    pub fn new(
        credentials: Arc<dyn CredentialStore>,
        encoder: Arc<JwtEncoder>,
        registry: Arc<RevocationRegistry>,
        hasher: Arc<PasswordHasher>,
        validator: Arc<PasswordValidator>,
    ) -> Self {
        Self {
            credentials,
            encoder,
            registry,
            hasher,
            validator,
        }
    }

    /// Registers a new account with the default role.
    pub async fn register(&self, registration: Registration) -> AppResult<User> {
        let username = registration.username.trim();
        let email = registration.email.trim();

        if username.is_empty() {
            return Err(AppError::validation("Username is required"));
        }
        if !email.contains('@') {
            return Err(AppError::validation("Email must contain '@'"));
        }
        self.validator.validate(&registration.password)?;

        if self.credentials.find_by_email(email).await?.is_some() {
            return Err(AppError::conflict("Email already registered"));
        }

        let password_hash = self.hasher.hash(&registration.password)?;
        let user = self
            .credentials
            .create(&NewUser {
                username: username.to_string(),
                email: email.to_string(),
                password_hash,
                role: Role::DEFAULT,
            })
            .await?;

        info!(user_id = user.id, role = %user.role, "User registered");
        Ok(user)
    }

    /// Checks credentials and issues a token.
    ///
    /// An unknown email is reported as not found and a wrong password as
    /// unauthorized.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<LoginOutcome> {
        let user = self
            .credentials
            .find_by_email(email.trim())
            .await?
            .ok_or_else(|| AppError::not_found("Email is not registered"))?;

        if !self.hasher.verify(password, &user.password_hash)? {
            warn!(user_id = user.id, "Login rejected: wrong password");
            return Err(AppError::unauthorized("Wrong password"));
        }

        let issued = self.encoder.issue(
            user.id,
            &user.email,
            user.role,
            self.encoder.default_ttl(),
        )?;

        info!(user_id = user.id, role = %user.role, "User logged in");
        Ok(LoginOutcome {
            token: issued.token,
            expires_at: issued.claims.expires_at(),
            user,
        })
    }

    /// Revokes the presented token until its natural expiry.
    ///
    /// Fails if the revocation could not be recorded; the token then stays
    /// valid.
    pub async fn logout(&self, admission: &Admission) -> AppResult<()> {
        self.registry
            .revoke(&admission.token, admission.claims.expires_at())
            .await?;
        info!(user_id = admission.claims.user_id(), "User logged out");
        Ok(())
    }

    /// Replaces the current user's password.
    pub async fn change_password(&self, ctx: &RequestContext, new_password: &str) -> AppResult<()> {
        self.validator.validate(new_password)?;
        let hash = self.hasher.hash(new_password)?;
        self.credentials.update_password(ctx.user_id, &hash).await?;
        info!(user_id = ctx.user_id, "Password changed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use library_auth::JwtDecoder;
    use library_cache::memory::MemoryCacheProvider;
    use library_core::config::{AuthConfig, MemoryCacheConfig};
    use library_core::error::ErrorKind;
    use library_database::memory::MemoryStore;

    struct Fixture {
        service: AuthService,
        decoder: JwtDecoder,
        registry: Arc<RevocationRegistry>,
    }

    fn fixture() -> Fixture {
        let config = AuthConfig {
            jwt_secret: "service-test-secret".to_string(),
            ..AuthConfig::default()
        };
        let cache = Arc::new(MemoryCacheProvider::new(&MemoryCacheConfig {
            max_capacity: 100,
        }));
        let registry = Arc::new(RevocationRegistry::new(cache, &config));
        let service = AuthService::new(
            Arc::new(MemoryStore::new()),
            Arc::new(JwtEncoder::new(&config).unwrap()),
            registry.clone(),
            Arc::new(PasswordHasher::new()),
            Arc::new(PasswordValidator::new(&config)),
        );
        Fixture {
            service,
            decoder: JwtDecoder::new(&config).unwrap(),
            registry,
        }
    }

    fn registration(email: &str, password: &str) -> Registration {
        Registration {
            username: "sari".to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_assigns_default_role() {
        let f = fixture();
        let user = f
            .service
            .register(registration("sari@gmail.com", "rahasia"))
            .await
            .unwrap();
        assert_eq!(user.role, Role::Student);
        assert_ne!(user.password_hash, "rahasia");
    }

    #[tokio::test]
    async fn test_register_rejects_bad_input() {
        let f = fixture();
        let no_at = f.service.register(registration("sari.gmail.com", "rahasia")).await;
        assert_eq!(no_at.unwrap_err().kind, ErrorKind::Validation);

        let short = f.service.register(registration("sari@gmail.com", "abc")).await;
        assert_eq!(short.unwrap_err().kind, ErrorKind::Validation);

        let mut blank = registration("sari@gmail.com", "rahasia");
        blank.username = "  ".to_string();
        assert_eq!(f.service.register(blank).await.unwrap_err().kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_duplicate_registration_conflicts() {
        let f = fixture();
        f.service
            .register(registration("sari@gmail.com", "rahasia"))
            .await
            .unwrap();
        let err = f
            .service
            .register(registration("sari@gmail.com", "lainnya"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_login_outcomes() {
        let f = fixture();
        let user = f
            .service
            .register(registration("sari@gmail.com", "rahasia"))
            .await
            .unwrap();

        let unknown = f.service.login("budi@gmail.com", "rahasia").await.unwrap_err();
        assert_eq!(unknown.kind, ErrorKind::NotFound);

        let wrong = f.service.login("sari@gmail.com", "salah!!").await.unwrap_err();
        assert_eq!(wrong.kind, ErrorKind::Unauthorized);

        let outcome = f.service.login("sari@gmail.com", "rahasia").await.unwrap();
        let claims = f.decoder.verify(&outcome.token).unwrap();
        assert_eq!(claims.user_id(), user.id);
        assert_eq!(claims.role, Role::Student);
        assert_eq!(outcome.expires_at, claims.expires_at());
    }

    #[tokio::test]
    async fn test_logout_revokes_token() {
        let f = fixture();
        f.service
            .register(registration("sari@gmail.com", "rahasia"))
            .await
            .unwrap();
        let outcome = f.service.login("sari@gmail.com", "rahasia").await.unwrap();
        let admission = Admission {
            claims: f.decoder.verify(&outcome.token).unwrap(),
            token: outcome.token.clone(),
        };

        assert!(!f.registry.is_revoked(&outcome.token).await.unwrap());
        f.service.logout(&admission).await.unwrap();
        assert!(f.registry.is_revoked(&outcome.token).await.unwrap());
    }

    #[tokio::test]
    async fn test_change_password() {
        let f = fixture();
        let user = f
            .service
            .register(registration("sari@gmail.com", "rahasia"))
            .await
            .unwrap();
        let ctx = RequestContext::new(user.id, &user.email, user.role);

        let short = f.service.change_password(&ctx, "123").await.unwrap_err();
        assert_eq!(short.kind, ErrorKind::Validation);

        f.service.change_password(&ctx, "baru123").await.unwrap();
        assert!(f.service.login("sari@gmail.com", "rahasia").await.is_err());
        f.service.login("sari@gmail.com", "baru123").await.unwrap();
    }
}
