//! Identity boundary
//!
//! Authentication itself is handled upstream; requests arrive with a
//! trusted gateway identity in headers. This module extracts that
//! identity as [`CurrentUser`] for handlers that need ownership or
//! admin checks.

use axum::{
    extract::{FromRequestParts, OptionalFromRequestParts},
    http::request::Parts,
};
use surrealdb::RecordId;

use crate::db::repository::parse_record_id;
use crate::utils::AppError;

const USER_ID_HEADER: &str = "x-user-id";
const USER_ROLE_HEADER: &str = "x-user-role";
const USER_TABLE: &str = "user";

/// The opaque current-user identity: a user record reference plus the
/// admin flag.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: RecordId,
    pub is_admin: bool,
}

impl CurrentUser {
    /// Reject non-admin callers
    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.is_admin {
            Ok(())
        } else {
            Err(AppError::forbidden("Admin access required"))
        }
    }

    /// Owner-or-admin check for user-scoped resources
    pub fn can_access(&self, owner: &RecordId) -> bool {
        self.is_admin || &self.id == owner
    }
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Check if already extracted on this request
        if let Some(user) = parts.extensions.get::<CurrentUser>() {
            return Ok(user.clone());
        }

        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|h| h.to_str().ok())
            .filter(|v| !v.is_empty())
            .ok_or(AppError::Unauthorized)?;

        let is_admin = parts
            .headers
            .get(USER_ROLE_HEADER)
            .and_then(|h| h.to_str().ok())
            .is_some_and(|role| role.eq_ignore_ascii_case("admin"));

        let user = CurrentUser {
            id: parse_record_id(USER_TABLE, user_id),
            is_admin,
        };

        // Store in extensions for potential reuse
        parts.extensions.insert(user.clone());

        Ok(user)
    }
}

/// Optional variant for endpoints that are public but grant extras to
/// an identified caller (e.g. `includeDeleted` on the catalog list).
impl<S> OptionalFromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        match <CurrentUser as FromRequestParts<S>>::from_request_parts(parts, state).await {
            Ok(user) => Ok(Some(user)),
            Err(AppError::Unauthorized) => Ok(None),
            Err(e) => Err(e),
        }
    }
}
