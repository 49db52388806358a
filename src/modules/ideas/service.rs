use anyhow::Context;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::Principal;
use crate::modules::ideas::model::{CreateIdeaDto, Idea, IdeaReport, UpdateTitleDto};
use crate::modules::users::model::UserRole;
use crate::utils::errors::AppError;

const IDEA_COLUMNS: &str = "id, title, votes, creator_id, created_at";

pub struct IdeaService;

impl IdeaService {
    /// Creates a new idea with zero votes, owned by the creator.
    #[instrument(skip(db))]
    pub async fn create(
        db: &PgPool,
        dto: CreateIdeaDto,
        creator_id: Uuid,
    ) -> Result<Idea, AppError> {
        let idea = sqlx::query_as::<_, Idea>(&format!(
            "INSERT INTO ideas (title, creator_id) VALUES ($1, $2) RETURNING {IDEA_COLUMNS}"
        ))
        .bind(&dto.title)
        .bind(creator_id)
        .fetch_one(db)
        .await
        .context("Failed to insert idea")
        .map_err(AppError::database)?;

        Ok(idea)
    }

    /// Returns all ideas. Public read, no filtering.
    #[instrument(skip(db))]
    pub async fn find_all(db: &PgPool) -> Result<Vec<Idea>, AppError> {
        let ideas = sqlx::query_as::<_, Idea>(&format!(
            "SELECT {IDEA_COLUMNS} FROM ideas ORDER BY created_at"
        ))
        .fetch_all(db)
        .await
        .context("Failed to fetch ideas")
        .map_err(AppError::database)?;

        Ok(ideas)
    }

    /// Casts a vote on an idea and increments its counter.
    ///
    /// Runs as a single transaction. The existence pre-check gives the
    /// common duplicate a clean 409; the unique constraint on
    /// `(user_id, idea_id)` is what actually guarantees one vote per user
    /// when two requests race, so a constraint violation is surfaced as
    /// the same 409 rather than a double increment.
    #[instrument(skip(db))]
    pub async fn vote(db: &PgPool, idea_id: Uuid, voter_id: Uuid) -> Result<Idea, AppError> {
        let mut tx = db.begin().await.map_err(AppError::database)?;

        let idea = sqlx::query_as::<_, Idea>(&format!(
            "SELECT {IDEA_COLUMNS} FROM ideas WHERE id = $1"
        ))
        .bind(idea_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(AppError::database)?;

        if idea.is_none() {
            return Err(AppError::not_found(format!(
                "Idea with id {} not found",
                idea_id
            )));
        }

        let already_voted: Option<Uuid> =
            sqlx::query_scalar("SELECT id FROM votes WHERE user_id = $1 AND idea_id = $2")
                .bind(voter_id)
                .bind(idea_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(AppError::database)?;

        if already_voted.is_some() {
            return Err(AppError::conflict("You have already voted on this idea"));
        }

        sqlx::query("INSERT INTO votes (user_id, idea_id) VALUES ($1, $2)")
            .bind(voter_id)
            .bind(idea_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                if e.as_database_error()
                    .is_some_and(|db_err| db_err.is_unique_violation())
                {
                    AppError::conflict("You have already voted on this idea")
                } else {
                    AppError::database(e)
                }
            })?;

        let updated = sqlx::query_as::<_, Idea>(&format!(
            "UPDATE ideas SET votes = votes + 1 WHERE id = $1 RETURNING {IDEA_COLUMNS}"
        ))
        .bind(idea_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(AppError::database)?;

        tx.commit().await.map_err(AppError::database)?;

        Ok(updated)
    }

    /// Updates an idea's title. Only the creator may do this.
    #[instrument(skip(db))]
    pub async fn update_title(
        db: &PgPool,
        idea_id: Uuid,
        dto: UpdateTitleDto,
        requester_id: Uuid,
    ) -> Result<Idea, AppError> {
        let idea = Self::load(db, idea_id).await?;

        if idea.creator_id != requester_id {
            return Err(AppError::forbidden(
                "Only the creator can update the title of this idea",
            ));
        }

        let updated = sqlx::query_as::<_, Idea>(&format!(
            "UPDATE ideas SET title = $1 WHERE id = $2 RETURNING {IDEA_COLUMNS}"
        ))
        .bind(&dto.new_title)
        .bind(idea_id)
        .fetch_one(db)
        .await
        .context("Failed to update idea title")
        .map_err(AppError::database)?;

        Ok(updated)
    }

    /// Deletes an idea. Only the creator or an admin may do this; votes
    /// are removed by the cascade.
    #[instrument(skip(db))]
    pub async fn delete(db: &PgPool, idea_id: Uuid, requester: &Principal) -> Result<(), AppError> {
        let idea = Self::load(db, idea_id).await?;

        let is_creator = idea.creator_id == requester.id;
        let is_admin = requester.role == UserRole::Admin;
        if !is_creator && !is_admin {
            return Err(AppError::forbidden(
                "Only the creator or an administrator can delete this idea",
            ));
        }

        sqlx::query("DELETE FROM ideas WHERE id = $1")
            .bind(idea_id)
            .execute(db)
            .await
            .context("Failed to delete idea")
            .map_err(AppError::database)?;

        Ok(())
    }

    /// Builds a detailed report for an idea: creator and voter usernames
    /// plus the accumulated vote count.
    #[instrument(skip(db))]
    pub async fn get_report(db: &PgPool, idea_id: Uuid) -> Result<IdeaReport, AppError> {
        let row: Option<(Uuid, String, i32, String)> = sqlx::query_as(
            "SELECT i.id, i.title, i.votes, u.username
             FROM ideas i
             INNER JOIN users u ON u.id = i.creator_id
             WHERE i.id = $1",
        )
        .bind(idea_id)
        .fetch_optional(db)
        .await
        .context("Failed to fetch idea report")
        .map_err(AppError::database)?;

        let (id, title, votes, creator) = row.ok_or_else(|| {
            AppError::not_found(format!("Idea with id {} not found", idea_id))
        })?;

        let voters: Vec<String> = sqlx::query_scalar(
            "SELECT u.username
             FROM votes v
             INNER JOIN users u ON u.id = v.user_id
             WHERE v.idea_id = $1
             ORDER BY u.username",
        )
        .bind(idea_id)
        .fetch_all(db)
        .await
        .context("Failed to fetch idea voters")
        .map_err(AppError::database)?;

        Ok(IdeaReport {
            id,
            title,
            creator,
            votes_count: votes,
            voters,
        })
    }

    async fn load(db: &PgPool, idea_id: Uuid) -> Result<Idea, AppError> {
        sqlx::query_as::<_, Idea>(&format!("SELECT {IDEA_COLUMNS} FROM ideas WHERE id = $1"))
            .bind(idea_id)
            .fetch_optional(db)
            .await
            .map_err(AppError::database)?
            .ok_or_else(|| AppError::not_found(format!("Idea with id {} not found", idea_id)))
    }
}
