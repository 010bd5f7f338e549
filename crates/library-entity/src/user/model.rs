//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::role::Role;

/// A registered library user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: i64,
    /// Display name chosen at registration.
    pub username: String,
    /// Unique login email.
    pub email: String,
    /// Argon2 password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Identifier of the user's row in `roles`.
    pub role_id: i32,
    /// Role resolved from `role_id`.
    #[sqlx(rename = "role_id", try_from = "i32")]
    pub role: Role,
    /// When the user registered.
    pub created_at: DateTime<Utc>,
}

/// Data required to create a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    /// Display name.
    pub username: String,
    /// Login email.
    pub email: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Assigned role.
    pub role: Role,
}

/// The publicly visible part of a user, as cached per user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Profile {
    /// Display name.
    pub username: String,
    /// Login email.
    pub email: String,
    /// Identifier of the user's role.
    pub role_id: i32,
    /// Role resolved from `role_id`.
    #[sqlx(rename = "role_id", try_from = "i32")]
    pub role: Role,
}

impl From<&User> for Profile {
    fn from(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            email: user.email.clone(),
            role_id: user.role_id,
            role: user.role,
        }
    }
}

/// Requested profile changes. Blank fields keep their current value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileUpdate {
    /// New display name.
    #[serde(default)]
    pub username: Option<String>,
    /// New login email.
    #[serde(default)]
    pub email: Option<String>,
}

impl ProfileUpdate {
    /// Resolve the final `(username, email)` pair against the stored profile.
    pub fn resolve(&self, current: &Profile) -> (String, String) {
        let pick = |requested: &Option<String>, existing: &str| {
            requested
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .unwrap_or(existing)
                .to_string()
        };
        (
            pick(&self.username, &current.username),
            pick(&self.email, &current.email),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> Profile {
        Profile {
            username: "ayu".to_string(),
            email: "ayu@gmail.com".to_string(),
            role_id: 3,
            role: Role::Student,
        }
    }

    #[test]
    fn test_blank_fields_keep_current_values() {
        let update = ProfileUpdate {
            username: Some("   ".to_string()),
            email: None,
        };
        assert_eq!(
            update.resolve(&profile()),
            ("ayu".to_string(), "ayu@gmail.com".to_string())
        );
    }

    #[test]
    fn test_present_fields_replace_values() {
        let update = ProfileUpdate {
            username: Some("ayu lestari".to_string()),
            email: Some(" ayu.l@gmail.com ".to_string()),
        };
        assert_eq!(
            update.resolve(&profile()),
            ("ayu lestari".to_string(), "ayu.l@gmail.com".to_string())
        );
    }
}
