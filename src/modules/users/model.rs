//! User data models and DTOs.
//!
//! The public [`User`] entity deliberately carries no password field:
//! the stored hash never leaves the service layer on any read path.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Coarse privilege tier gating administrative operations.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema, Default,
)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    #[default]
    User,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::User => "user",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(UserRole::Admin),
            "user" => Some(UserRole::User),
            _ => None,
        }
    }
}

/// A user as exposed by the API: id, username and role only.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub role: UserRole,
}

/// Internal DTO for creating a user. Role defaults to [`UserRole::User`];
/// only the seed routine sets it explicitly.
#[derive(Deserialize, Debug, Clone, Validate, ToSchema)]
pub struct CreateUserDto {
    #[validate(length(min = 1, message = "Username must not be empty"))]
    pub username: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters long"))]
    pub password: String,
    pub role: Option<UserRole>,
}

/// DTO for changing another user's role. Admin-only.
#[derive(Deserialize, Debug, Clone, Validate, ToSchema)]
pub struct UpdateRoleDto {
    pub role: UserRole,
}

/// Generic confirmation message response.
#[derive(Serialize, Debug, Clone, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}
