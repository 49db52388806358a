use anyhow::Result;
use sqlx::PgPool;

use crate::config::cors::CorsConfig;
use crate::config::database::init_db_pool;
use crate::config::jwt::JwtConfig;

#[derive(Clone, Debug)]
pub struct AppState {
    pub db: PgPool,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
}

/// Builds the shared application state. Fails when the JWT secret is not
/// configured; the caller aborts startup in that case.
pub async fn init_app_state() -> Result<AppState> {
    Ok(AppState {
        db: init_db_pool().await,
        jwt_config: JwtConfig::from_env()?,
        cors_config: CorsConfig::from_env(),
    })
}
