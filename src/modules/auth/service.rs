use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::config::jwt::JwtConfig;
use crate::modules::auth::model::{LoginRequest, LoginResponse, SignupDto};
use crate::modules::users::model::{CreateUserDto, User, UserRole};
use crate::modules::users::service::UserService;
use crate::utils::errors::AppError;
use crate::utils::jwt::create_access_token;
use crate::utils::password::verify_password;

/// Row type used only by login; the password hash never leaves this
/// module.
#[derive(sqlx::FromRow)]
struct UserCredentials {
    id: Uuid,
    username: String,
    password: String,
    role: UserRole,
}

pub struct AuthService;

impl AuthService {
    /// Creates a new account with role `user`.
    #[instrument(skip_all)]
    pub async fn signup(db: &PgPool, dto: SignupDto) -> Result<User, AppError> {
        UserService::create(
            db,
            CreateUserDto {
                username: dto.username,
                password: dto.password,
                role: None,
            },
        )
        .await
    }

    /// Validates credentials and issues a bearer token.
    ///
    /// Unknown username and wrong password produce the same 401 so the
    /// response does not reveal which usernames exist.
    #[instrument(skip_all)]
    pub async fn login(
        db: &PgPool,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<LoginResponse, AppError> {
        let credentials = sqlx::query_as::<_, UserCredentials>(
            "SELECT id, username, password, role FROM users WHERE username = $1",
        )
        .bind(&dto.username)
        .fetch_optional(db)
        .await
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::unauthorized("Invalid username or password"))?;

        let is_valid = verify_password(&dto.password, &credentials.password)?;
        if !is_valid {
            return Err(AppError::unauthorized("Invalid username or password"));
        }

        let access_token = create_access_token(
            credentials.id,
            &credentials.username,
            &credentials.role,
            jwt_config,
        )?;

        let voted_polls = UserService::get_voted_idea_ids(db, credentials.id).await?;

        Ok(LoginResponse {
            access_token,
            voted_polls,
        })
    }
}
