//! Session resolution: bearer token in, principal and role out.
//!
//! The role is looked up fresh on every request and handed to handlers as
//! part of [`Session`]. Nothing caches a "current role" between requests.

pub mod directory;
pub mod handlers;
pub mod revocation;
pub mod tokens;

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use serde::Serialize;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::access::{authorize, Action, Role, Viewer};
use crate::errors::AppError;
use crate::state::AppState;

pub use directory::{PgRoleDirectory, RoleDirectory};
pub use revocation::{revocation_key, SessionRevocations};
pub use tokens::{Claims, TokenVerifier};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Principal {
    pub id: Uuid,
    pub email: Option<String>,
}

/// An authenticated request's identity and its single role, if assigned.
#[derive(Debug, Clone)]
pub struct Session {
    pub principal: Principal,
    pub role: Option<Role>,
    /// Where sign-out records this token.
    pub revocation_key: String,
    pub expires_at: usize,
}

impl Session {
    /// Fails with 403 unless the session's role may perform `action`.
    pub fn require(&self, action: Action) -> Result<(), AppError> {
        authorize(action, self.role).map_err(|denied| {
            debug!("principal {}: {denied}", self.principal.id);
            AppError::Forbidden
        })
    }

    pub fn viewer(&self) -> Viewer {
        Viewer::SignedIn(self.role)
    }
}

/// Builds a session from verified claims. A failed role lookup leaves the
/// session without a role rather than guessing one.
pub async fn resolve_session(
    claims: Claims,
    revocation_key: String,
    roles: &dyn RoleDirectory,
) -> Session {
    let role = match roles.role_of(claims.sub).await {
        Ok(role) => role,
        Err(e) => {
            warn!("role lookup failed for principal {}: {e:#}", claims.sub);
            None
        }
    };

    Session {
        principal: Principal {
            id: claims.sub,
            email: claims.email,
        },
        role,
        revocation_key,
        expires_at: claims.exp,
    }
}

#[axum::async_trait]
impl FromRequestParts<AppState> for Session {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(tokens::bearer_token)
            .ok_or(AppError::Unauthenticated)?;

        let claims = state.auth.verify(token)?;

        let key = revocation_key(claims.session_id, token);
        if state.revocations.is_revoked(&key).await {
            debug!("rejected signed-out token of principal {}", claims.sub);
            return Err(AppError::Unauthenticated);
        }

        Ok(resolve_session(claims, key, state.roles.as_ref()).await)
    }
}

#[cfg(test)]
pub mod testing {
    use super::*;

    pub fn session(role: Option<Role>) -> Session {
        Session {
            principal: Principal {
                id: Uuid::new_v4(),
                email: Some("someone@example.com".to_string()),
            },
            role,
            revocation_key: revocation_key(None, "test-token"),
            expires_at: usize::MAX,
        }
    }
}
