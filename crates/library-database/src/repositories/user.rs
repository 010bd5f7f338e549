//! User repository implementation.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::PgPool;

use library_core::deadline::bounded;
use library_core::error::{AppError, ErrorKind};
use library_core::result::AppResult;
use library_entity::user::{NewUser, Profile, User};

use super::map_db_error;
use crate::connection::DatabasePool;
use crate::store::{CredentialStore, ProfileStore};

const USER_COLUMNS: &str = "id, username, email, password_hash, role_id, created_at";

/// Repository for users, their credentials and profiles.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
    query_timeout: Duration,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(db: &DatabasePool) -> Self {
        Self {
            pool: db.pool().clone(),
            query_timeout: db.query_timeout(),
        }
    }
}

#[async_trait]
impl CredentialStore for UserRepository {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let sql = format!(
            "SELECT {USER_COLUMNS} FROM users WHERE LOWER(email) = LOWER($1)"
        );
        bounded(self.query_timeout, "users.find_by_email", async {
            sqlx::query_as::<_, User>(&sql)
                .bind(email)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to find user by email", e)
                })
        })
        .await
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        let sql = format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        );
        bounded(self.query_timeout, "users.find_by_id", async {
            sqlx::query_as::<_, User>(&sql)
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to find user by id", e)
                })
        })
        .await
    }

    async fn create(&self, user: &NewUser) -> AppResult<User> {
        let sql = format!(
            "INSERT INTO users (username, email, password_hash, role_id) \
             VALUES ($1, $2, $3, $4) RETURNING {USER_COLUMNS}"
        );
        bounded(self.query_timeout, "users.create", async {
            sqlx::query_as::<_, User>(&sql)
                .bind(&user.username)
                .bind(&user.email)
                .bind(&user.password_hash)
                .bind(user.role.id())
                .fetch_one(&self.pool)
                .await
                .map_err(map_db_error("Failed to create user", "Email already registered"))
        })
        .await
    }

    async fn update_password(&self, id: i64, password_hash: &str) -> AppResult<()> {
        bounded(self.query_timeout, "users.update_password", async {
            let result = sqlx::query("UPDATE users SET password_hash = $1 WHERE id = $2")
                .bind(password_hash)
                .bind(id)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to update password", e)
                })?;
            if result.rows_affected() == 0 {
                return Err(AppError::not_found(format!("User {id} not found")));
            }
            Ok(())
        })
        .await
    }
}

#[async_trait]
impl ProfileStore for UserRepository {
    async fn find_profile(&self, user_id: i64) -> AppResult<Option<Profile>> {
        bounded(self.query_timeout, "users.find_profile", async {
            sqlx::query_as::<_, Profile>(
                "SELECT username, email, role_id FROM users WHERE id = $1",
            )
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load profile", e))
        })
        .await
    }

    async fn email_taken_by_other(&self, email: &str, user_id: i64) -> AppResult<bool> {
        bounded(self.query_timeout, "users.email_taken_by_other", async {
            sqlx::query_scalar::<_, bool>(
                "SELECT EXISTS(SELECT 1 FROM users WHERE LOWER(email) = LOWER($1) AND id <> $2)",
            )
            .bind(email)
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to check email ownership", e)
            })
        })
        .await
    }

    async fn update_profile(&self, user_id: i64, username: &str, email: &str) -> AppResult<()> {
        bounded(self.query_timeout, "users.update_profile", async {
            let result = sqlx::query("UPDATE users SET username = $1, email = $2 WHERE id = $3")
                .bind(username)
                .bind(email)
                .bind(user_id)
                .execute(&self.pool)
                .await
                .map_err(map_db_error("Failed to update profile", "Email already registered"))?;
            if result.rows_affected() == 0 {
                return Err(AppError::not_found(format!("User {user_id} not found")));
            }
            Ok(())
        })
        .await
    }
}
