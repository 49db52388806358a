//! Token-authentication checkpoint.
//!
//! Routes registered without this extractor are public; everything else
//! resolves a [`Principal`] from the bearer token before the handler runs.
//! The principal is then passed to domain operations as an explicit
//! argument, never read back out of request extensions.

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use uuid::Uuid;

use crate::modules::auth::model::Claims;
use crate::modules::users::model::UserRole;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::verify_token;

/// The authenticated identity resolved for a request.
#[derive(Debug, Clone)]
pub struct Principal {
    pub id: Uuid,
    pub username: String,
    pub role: UserRole,
}

impl Principal {
    /// Builds a principal from verified claims.
    ///
    /// A token that verified cryptographically but lacks a usable subject,
    /// username, or role is treated as an invalid token, not a distinct
    /// error class.
    pub fn from_claims(claims: &Claims) -> Result<Self, AppError> {
        let id = Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::unauthorized("Invalid authentication token"))?;

        if claims.username.is_empty() {
            return Err(AppError::unauthorized("Invalid authentication token"));
        }

        let role = UserRole::parse(&claims.role)
            .ok_or_else(|| AppError::unauthorized("Invalid authentication token"))?;

        Ok(Self {
            id,
            username: claims.username.clone(),
            role,
        })
    }
}

/// Extractor that validates the bearer token and yields the principal.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Principal);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::unauthorized("Missing authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::unauthorized("Invalid authorization header format"))?;

        let claims = verify_token(token, &state.jwt_config)?;
        let principal = Principal::from_claims(&claims)?;

        Ok(AuthUser(principal))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(sub: &str, username: &str, role: &str) -> Claims {
        Claims {
            sub: sub.to_string(),
            username: username.to_string(),
            role: role.to_string(),
            exp: 9999999999,
            iat: 1234567890,
        }
    }

    #[test]
    fn test_principal_from_valid_claims() {
        let id = Uuid::new_v4();
        let principal = Principal::from_claims(&claims(&id.to_string(), "alice", "user")).unwrap();
        assert_eq!(principal.id, id);
        assert_eq!(principal.username, "alice");
        assert_eq!(principal.role, UserRole::User);
    }

    #[test]
    fn test_principal_rejects_non_uuid_subject() {
        let result = Principal::from_claims(&claims("not-a-uuid", "alice", "user"));
        assert!(result.is_err());
    }

    #[test]
    fn test_principal_rejects_empty_username() {
        let id = Uuid::new_v4().to_string();
        let result = Principal::from_claims(&claims(&id, "", "user"));
        assert!(result.is_err());
    }

    #[test]
    fn test_principal_rejects_unknown_role() {
        let id = Uuid::new_v4().to_string();
        let result = Principal::from_claims(&claims(&id, "alice", "superuser"));
        assert!(result.is_err());
    }
}
