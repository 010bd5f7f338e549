//! Request context carrying the authenticated user.

use serde::{Deserialize, Serialize};

use library_auth::Claims;
use library_entity::user::Role;

/// Context for the current authenticated request.
///
/// Built from admitted claims and passed into service methods so that
/// every operation knows *who* is acting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: i64,
    /// The email carried in the token.
    pub email: String,
    /// The user's role at the time the token was issued.
    pub role: Role,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(user_id: i64, email: impl Into<String>, role: Role) -> Self {
        Self {
            user_id,
            email: email.into(),
            role,
        }
    }

    /// Creates a context for the subject of admitted claims.
    pub fn from_claims(claims: &Claims) -> Self {
        Self::new(claims.user_id(), claims.email.clone(), claims.role)
    }

    /// Returns whether the current user is a manager.
    pub fn is_manager(&self) -> bool {
        matches!(self.role, Role::Manager)
    }
}
