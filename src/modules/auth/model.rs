use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// JWT claims: subject (user id), username, role, and absolute
/// issued-at/expiry timestamps in seconds.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub username: String,
    pub role: String,
    pub exp: usize,
    pub iat: usize,
}

/// DTO for creating an account. New accounts always get role `user`.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SignupDto {
    #[validate(length(min = 1, message = "Username must not be empty"))]
    pub username: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters long"))]
    pub password: String,
}

/// DTO for authenticating with username and password.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username must not be empty"))]
    pub username: String,
    #[validate(length(min = 1, message = "Password must not be empty"))]
    pub password: String,
}

/// Successful login: a bearer token plus the ids of ideas the user has
/// already voted on, so clients can render vote state immediately.
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(rename = "votedPolls")]
    pub voted_polls: Vec<Uuid>,
}
