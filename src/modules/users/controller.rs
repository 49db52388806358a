use axum::Json;
use axum::extract::{Path, State};
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::AuthUser;
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::ideas::model::Idea;
use crate::modules::users::model::{MessageResponse, UpdateRoleDto, User};
use crate::modules::users::service::UserService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

/// List all users (admin only)
#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "All users without sensitive fields", body = Vec<User>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Requester is not an admin", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip_all)]
pub async fn list_users(
    State(state): State<AppState>,
    _auth_user: AuthUser,
) -> Result<Json<Vec<User>>, AppError> {
    let users = UserService::find_all(&state.db).await?;
    Ok(Json(users))
}

/// Change another user's role (admin only, never your own)
#[utoipa::path(
    patch,
    path = "/users/{id}/role",
    params(("id" = Uuid, Path, description = "Target user id")),
    request_body = UpdateRoleDto,
    responses(
        (status = 200, description = "Role updated", body = MessageResponse),
        (status = 403, description = "Not an admin, or attempting to change own role", body = ErrorResponse),
        (status = 404, description = "Target user not found", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip_all)]
pub async fn update_role(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    AuthUser(principal): AuthUser,
    ValidatedJson(dto): ValidatedJson<UpdateRoleDto>,
) -> Result<Json<MessageResponse>, AppError> {
    UserService::update_role(&state.db, id, dto.role, principal.id).await?;
    Ok(Json(MessageResponse {
        message: format!("User {} is now {}", id, dto.role.as_str()),
    }))
}

/// List the ideas the authenticated user has voted on
#[utoipa::path(
    get,
    path = "/users/me/votes",
    responses(
        (status = 200, description = "Ideas the user voted on", body = Vec<Idea>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip_all)]
pub async fn my_voted_ideas(
    State(state): State<AppState>,
    AuthUser(principal): AuthUser,
) -> Result<Json<Vec<Idea>>, AppError> {
    let ideas = UserService::find_voted_ideas(&state.db, principal.id).await?;
    Ok(Json(ideas))
}
