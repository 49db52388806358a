//! Startup seeding of the default administrator account.

use sqlx::PgPool;
use tracing::info;

use crate::utils::errors::AppError;
use crate::utils::password::hash_password;

const DEFAULT_ADMIN_USERNAME: &str = "admin";
const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

/// Guarantees that exactly one admin user named `admin` exists after
/// first boot. Called once during process initialization; idempotent —
/// `ON CONFLICT DO NOTHING` covers the race where two processes boot
/// against the same database.
pub async fn ensure_default_admin(db: &PgPool) -> Result<(), AppError> {
    let existing: Option<uuid::Uuid> =
        sqlx::query_scalar("SELECT id FROM users WHERE username = $1")
            .bind(DEFAULT_ADMIN_USERNAME)
            .fetch_optional(db)
            .await
            .map_err(AppError::database)?;

    if existing.is_some() {
        return Ok(());
    }

    let hashed = hash_password(DEFAULT_ADMIN_PASSWORD)?;

    sqlx::query(
        "INSERT INTO users (username, password, role)
         VALUES ($1, $2, 'admin')
         ON CONFLICT (username) DO NOTHING",
    )
    .bind(DEFAULT_ADMIN_USERNAME)
    .bind(&hashed)
    .execute(db)
    .await
    .map_err(AppError::database)?;

    info!("Default admin account created (username: admin)");

    Ok(())
}
