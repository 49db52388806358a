use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;
use tracing::instrument;
use utoipa::ToSchema;

use crate::modules::auth::model::{LoginRequest, LoginResponse, SignupDto};
use crate::modules::auth::service::AuthService;
use crate::modules::users::model::User;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Create a new account (role is always `user`)
#[utoipa::path(
    post,
    path = "/auth/signup",
    request_body = SignupDto,
    responses(
        (status = 201, description = "Account created, password never returned", body = User),
        (status = 400, description = "Validation error or username already taken", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn signup(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<SignupDto>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let user = AuthService::signup(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Authenticate and receive a bearer token
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Authenticated", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 400, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let response = AuthService::login(&state.db, dto, &state.jwt_config).await?;
    Ok(Json(response))
}
