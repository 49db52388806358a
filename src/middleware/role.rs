//! Role-enforcement checkpoint.
//!
//! Composes with the token checkpoint rather than extending it: the
//! middleware invokes [`AuthUser::from_request_parts`] explicitly to
//! resolve the principal, then checks the role against the allowed set.
//! An empty allowed set allows any authenticated principal through.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::middleware::auth::{AuthUser, Principal};
use crate::modules::users::model::UserRole;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Middleware that requires the authenticated user to hold one of the
/// allowed roles. Missing or invalid token fails with 401 before the role
/// is ever considered; a valid principal with the wrong role fails 403.
pub async fn require_roles(
    State(state): State<AppState>,
    req: Request,
    next: Next,
    allowed_roles: Vec<UserRole>,
) -> Result<Response, AppError> {
    if allowed_roles.is_empty() {
        return Ok(next.run(req).await);
    }

    let (mut parts, body) = req.into_parts();

    let AuthUser(principal) = AuthUser::from_request_parts(&mut parts, &state).await?;
    check_any_role(&principal, &allowed_roles)?;

    let req = Request::from_parts(parts, body);
    Ok(next.run(req).await)
}

/// Admin-only wrapper for use with `middleware::from_fn_with_state`.
pub async fn require_admin(State(state): State<AppState>, req: Request, next: Next) -> Response {
    match require_roles(State(state), req, next, vec![UserRole::Admin]).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

/// Checks that a principal holds one of the allowed roles.
pub fn check_any_role(principal: &Principal, allowed_roles: &[UserRole]) -> Result<(), AppError> {
    if !allowed_roles.contains(&principal.role) {
        return Err(AppError::forbidden(
            "Access denied: you do not have permission to access this resource",
        ));
    }

    Ok(())
}
