use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::AuthUser;
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::ideas::model::{CreateIdeaDto, Idea, IdeaReport, UpdateTitleDto};
use crate::modules::ideas::service::IdeaService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

/// List all ideas
#[utoipa::path(
    get,
    path = "/ideas",
    responses(
        (status = 200, description = "All ideas", body = Vec<Idea>)
    ),
    tag = "Ideas"
)]
#[instrument(skip_all)]
pub async fn list_ideas(State(state): State<AppState>) -> Result<Json<Vec<Idea>>, AppError> {
    let ideas = IdeaService::find_all(&state.db).await?;
    Ok(Json(ideas))
}

/// Create a new idea
#[utoipa::path(
    post,
    path = "/ideas",
    request_body = CreateIdeaDto,
    responses(
        (status = 201, description = "Idea created with zero votes", body = Idea),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 400, description = "Validation error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Ideas"
)]
#[instrument(skip_all)]
pub async fn create_idea(
    State(state): State<AppState>,
    AuthUser(principal): AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateIdeaDto>,
) -> Result<(StatusCode, Json<Idea>), AppError> {
    let idea = IdeaService::create(&state.db, dto, principal.id).await?;
    Ok((StatusCode::CREATED, Json(idea)))
}

/// Cast a vote on an idea (one vote per user)
#[utoipa::path(
    post,
    path = "/ideas/{id}/vote",
    params(("id" = Uuid, Path, description = "Idea id")),
    responses(
        (status = 200, description = "Vote recorded, updated idea returned", body = Idea),
        (status = 404, description = "Idea not found", body = ErrorResponse),
        (status = 409, description = "Already voted on this idea", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Ideas"
)]
#[instrument(skip_all)]
pub async fn cast_vote(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    AuthUser(principal): AuthUser,
) -> Result<Json<Idea>, AppError> {
    let idea = IdeaService::vote(&state.db, id, principal.id).await?;
    Ok(Json(idea))
}

/// Get a detailed report for an idea
#[utoipa::path(
    get,
    path = "/ideas/{id}/report",
    params(("id" = Uuid, Path, description = "Idea id")),
    responses(
        (status = 200, description = "Idea report with voter usernames", body = IdeaReport),
        (status = 404, description = "Idea not found", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Ideas"
)]
#[instrument(skip_all)]
pub async fn get_report(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    _auth_user: AuthUser,
) -> Result<Json<IdeaReport>, AppError> {
    let report = IdeaService::get_report(&state.db, id).await?;
    Ok(Json(report))
}

/// Update an idea's title (creator only)
#[utoipa::path(
    patch,
    path = "/ideas/{id}",
    params(("id" = Uuid, Path, description = "Idea id")),
    request_body = UpdateTitleDto,
    responses(
        (status = 200, description = "Title updated", body = Idea),
        (status = 403, description = "Requester is not the creator", body = ErrorResponse),
        (status = 404, description = "Idea not found", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Ideas"
)]
#[instrument(skip_all)]
pub async fn update_title(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    AuthUser(principal): AuthUser,
    ValidatedJson(dto): ValidatedJson<UpdateTitleDto>,
) -> Result<Json<Idea>, AppError> {
    let idea = IdeaService::update_title(&state.db, id, dto, principal.id).await?;
    Ok(Json(idea))
}

/// Delete an idea (creator or admin)
#[utoipa::path(
    delete,
    path = "/ideas/{id}",
    params(("id" = Uuid, Path, description = "Idea id")),
    responses(
        (status = 204, description = "Idea deleted, votes cascade"),
        (status = 403, description = "Requester is neither creator nor admin", body = ErrorResponse),
        (status = 404, description = "Idea not found", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Ideas"
)]
#[instrument(skip_all)]
pub async fn delete_idea(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    AuthUser(principal): AuthUser,
) -> Result<StatusCode, AppError> {
    IdeaService::delete(&state.db, id, &principal).await?;
    Ok(StatusCode::NO_CONTENT)
}
