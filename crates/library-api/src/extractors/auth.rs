//! `AuthUser` extractor: runs the authorization gate and injects the
//! request context.
//!
//! The roles a route admits are part of the extractor's type, so a handler
//! cannot run without its policy having been checked.

use std::marker::PhantomData;

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use library_auth::{Admission, AuthFailure};
use library_entity::user::{Role, RoleSet};
use library_service::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// The set of roles a route admits.
pub trait RolePolicy: Send + Sync + 'static {
    /// Admitted roles.
    const ROLES: RoleSet;
}

/// Every authenticated user.
#[derive(Debug, Clone, Copy)]
pub struct AnyRole;

impl RolePolicy for AnyRole {
    const ROLES: RoleSet = RoleSet::all();
}

/// Managers and librarians.
#[derive(Debug, Clone, Copy)]
pub struct Staff;

impl RolePolicy for Staff {
    const ROLES: RoleSet = RoleSet::empty().with(Role::Manager).with(Role::Librarian);
}

/// Managers only.
#[derive(Debug, Clone, Copy)]
pub struct ManagerOnly;

impl RolePolicy for ManagerOnly {
    const ROLES: RoleSet = RoleSet::empty().with(Role::Manager);
}

/// Roles that keep favorite books.
#[derive(Debug, Clone, Copy)]
pub struct FavoriteHolders;

impl RolePolicy for FavoriteHolders {
    const ROLES: RoleSet = RoleSet::empty().with(Role::Librarian).with(Role::Student);
}

/// Roles that may record a borrowing.
#[derive(Debug, Clone, Copy)]
pub struct Borrowers;

impl RolePolicy for Borrowers {
    const ROLES: RoleSet = RoleSet::empty().with(Role::Manager).with(Role::Student);
}

/// Extracted authenticated user context available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser<P: RolePolicy = AnyRole> {
    context: RequestContext,
    admission: Admission,
    _policy: PhantomData<fn() -> P>,
}

impl<P: RolePolicy> AuthUser<P> {
    /// Returns the inner `RequestContext`.
    pub fn context(&self) -> &RequestContext {
        &self.context
    }

    /// Returns the verified claims and the presented token.
    pub fn admission(&self) -> &Admission {
        &self.admission
    }
}

impl<P: RolePolicy> std::ops::Deref for AuthUser<P> {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.context
    }
}

impl<P: RolePolicy> FromRequestParts<AppState> for AuthUser<P> {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = match parts.headers.get(AUTHORIZATION) {
            Some(value) => Some(
                value
                    .to_str()
                    .map_err(|_| AuthFailure::MalformedCredentials)?,
            ),
            None => None,
        };

        let admission = state.gate.admit(header, P::ROLES).await?;
        let context = RequestContext::from_claims(&admission.claims);

        Ok(Self {
            context,
            admission,
            _policy: PhantomData,
        })
    }
}
