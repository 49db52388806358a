use anyhow::Context;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::ideas::model::Idea;
use crate::modules::users::model::{CreateUserDto, User, UserRole};
use crate::utils::errors::AppError;
use crate::utils::password::hash_password;

pub struct UserService;

impl UserService {
    /// Returns every user without sensitive fields.
    #[instrument(skip(db))]
    pub async fn find_all(db: &PgPool) -> Result<Vec<User>, AppError> {
        let users =
            sqlx::query_as::<_, User>("SELECT id, username, role FROM users ORDER BY username")
                .fetch_all(db)
                .await
                .context("Failed to fetch users")
                .map_err(AppError::database)?;

        Ok(users)
    }

    #[instrument(skip(db))]
    pub async fn find_by_username(db: &PgPool, username: &str) -> Result<Option<User>, AppError> {
        let user =
            sqlx::query_as::<_, User>("SELECT id, username, role FROM users WHERE username = $1")
                .bind(username)
                .fetch_optional(db)
                .await
                .context("Failed to fetch user by username")
                .map_err(AppError::database)?;

        Ok(user)
    }

    /// Creates a user, hashing the password. Role defaults to `user`.
    ///
    /// Username uniqueness is enforced here and backed by the unique
    /// constraint on `users.username`.
    #[instrument(skip_all)]
    pub async fn create(db: &PgPool, dto: CreateUserDto) -> Result<User, AppError> {
        let existing = Self::find_by_username(db, &dto.username).await?;
        if existing.is_some() {
            return Err(AppError::bad_request("Username is already taken"));
        }

        let hashed_password = hash_password(&dto.password)?;
        let role = dto.role.unwrap_or_default();

        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (username, password, role)
             VALUES ($1, $2, $3)
             RETURNING id, username, role",
        )
        .bind(&dto.username)
        .bind(&hashed_password)
        .bind(role)
        .fetch_one(db)
        .await
        .map_err(|e| {
            // A concurrent signup with the same username loses the race at
            // the constraint rather than at the pre-check.
            if e.as_database_error()
                .is_some_and(|db_err| db_err.is_unique_violation())
            {
                AppError::bad_request("Username is already taken")
            } else {
                AppError::database(e)
            }
        })?;

        Ok(user)
    }

    /// Changes the role of another user.
    ///
    /// No user, including an admin, may change their own role through this
    /// path. Fails with 404 when the target does not exist (the permissive
    /// silent no-op was deliberately not preserved).
    #[instrument(skip(db))]
    pub async fn update_role(
        db: &PgPool,
        target_user_id: Uuid,
        new_role: UserRole,
        requester_id: Uuid,
    ) -> Result<(), AppError> {
        if target_user_id == requester_id {
            return Err(AppError::forbidden("You cannot change your own role"));
        }

        let updated: Option<Uuid> =
            sqlx::query_scalar("UPDATE users SET role = $1 WHERE id = $2 RETURNING id")
                .bind(new_role)
                .bind(target_user_id)
                .fetch_optional(db)
                .await
                .context("Failed to update user role")
                .map_err(AppError::database)?;

        if updated.is_none() {
            return Err(AppError::not_found(format!(
                "User with id {} not found",
                target_user_id
            )));
        }

        Ok(())
    }

    /// Returns the ideas a user has voted on.
    #[instrument(skip(db))]
    pub async fn find_voted_ideas(db: &PgPool, user_id: Uuid) -> Result<Vec<Idea>, AppError> {
        let ideas = sqlx::query_as::<_, Idea>(
            "SELECT i.id, i.title, i.votes, i.creator_id, i.created_at
             FROM ideas i
             INNER JOIN votes v ON v.idea_id = i.id
             WHERE v.user_id = $1
             ORDER BY i.created_at",
        )
        .bind(user_id)
        .fetch_all(db)
        .await
        .context("Failed to fetch voted ideas")
        .map_err(AppError::database)?;

        Ok(ideas)
    }

    /// Returns only the ids of the ideas a user has voted on.
    #[instrument(skip(db))]
    pub async fn get_voted_idea_ids(db: &PgPool, user_id: Uuid) -> Result<Vec<Uuid>, AppError> {
        let ids: Vec<Uuid> = sqlx::query_scalar("SELECT idea_id FROM votes WHERE user_id = $1")
            .bind(user_id)
            .fetch_all(db)
            .await
            .context("Failed to fetch voted idea ids")
            .map_err(AppError::database)?;

        Ok(ids)
    }
}
