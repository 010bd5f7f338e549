//! Shared test helpers for integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use library_api::{Backends, build_app, build_state};
use library_auth::PasswordHasher;
use library_cache::CacheManager;
use library_core::config::{
    AppConfig, AuthConfig, BorrowingConfig, CacheConfig, CacheTtlConfig, DatabaseConfig,
    LoggingConfig, ServerConfig,
};
use library_database::CredentialStore;
use library_database::memory::MemoryStore;
use library_entity::user::{NewUser, Role};

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Relational store behind the router, for direct writes
    pub store: Arc<MemoryStore>,
}

impl TestApp {
    /// Create a test application with the default cache TTLs
    pub async fn new() -> Self {
        Self::with_ttls(CacheTtlConfig::default()).await
    }

    /// Create a test application with the given cache TTLs
    pub async fn with_ttls(ttl: CacheTtlConfig) -> Self {
        let config = test_config(ttl);
        let store = Arc::new(MemoryStore::with_genres(&[
            (1, "Novel"),
            (2, "Science"),
            (3, "History"),
        ]));
        let cache = Arc::new(
            CacheManager::new(&config.cache)
                .await
                .expect("Failed to init cache"),
        );

        let state = build_state(config, Backends::single(store.clone()), cache)
            .expect("Failed to build state");

        Self {
            router: build_app(state),
            store,
        }
    }

    /// Create a user directly in the store and return their ID
    pub async fn create_user(&self, username: &str, password: &str, role: Role) -> i64 {
        let hash = PasswordHasher::new()
            .hash(password)
            .expect("Failed to hash password");

        self.store
            .create(&NewUser {
                username: username.to_string(),
                email: format!("{username}@gmail.com"),
                password_hash: hash,
                role,
            })
            .await
            .expect("Failed to create test user")
            .id
    }

    /// Create a user with `role` and return a bearer token for them
    pub async fn token_for(&self, username: &str, role: Role) -> String {
        self.create_user(username, "password123", role).await;
        self.login(&format!("{username}@gmail.com"), "password123")
            .await
    }

    /// Login and return the access token
    pub async fn login(&self, email: &str, password: &str) -> String {
        let body = serde_json::json!({
            "email": email,
            "password": password,
        });

        let response = self
            .request("POST", "/api/auth/login", Some(body), None)
            .await;

        assert_eq!(
            response.status,
            StatusCode::OK,
            "Login failed: {:?}",
            response.body
        );

        response.body["data"]["access_token"]
            .as_str()
            .expect("No access_token in login response")
            .to_string()
    }

    /// Make an HTTP request with an optional bearer token
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let authorization = token.map(|t| format!("Bearer {t}"));
        self.request_with_authorization(method, path, body, authorization.as_deref())
            .await
    }

    /// Make an HTTP request with a raw `Authorization` header value
    pub async fn request_with_authorization(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        authorization: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(value) = authorization {
            req = req.header("Authorization", value);
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

fn test_config(ttl: CacheTtlConfig) -> AppConfig {
    AppConfig {
        server: ServerConfig::default(),
        database: DatabaseConfig {
            url: "postgres://unused".to_string(),
            max_connections: 1,
            min_connections: 0,
            connect_timeout_seconds: 1,
            idle_timeout_seconds: 1,
            query_timeout_seconds: 1,
        },
        cache: CacheConfig {
            provider: "memory".to_string(),
            ttl,
            ..CacheConfig::default()
        },
        auth: AuthConfig {
            jwt_secret: "integration-test-secret".to_string(),
            ..AuthConfig::default()
        },
        borrowing: BorrowingConfig::default(),
        logging: LoggingConfig::default(),
    }
}
