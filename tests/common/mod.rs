use http_body_util::BodyExt;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use ideaboard::config::cors::CorsConfig;
use ideaboard::config::jwt::JwtConfig;
use ideaboard::modules::users::model::UserRole;
use ideaboard::router::init_router;
use ideaboard::state::AppState;
use ideaboard::utils::jwt::create_access_token;
use ideaboard::utils::password::hash_password;

pub const TEST_JWT_SECRET: &str = "test_secret_key_for_testing_purposes";

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: TEST_JWT_SECRET.to_string(),
        access_token_expiry: 3600,
    }
}

pub fn setup_test_app(pool: PgPool) -> axum::Router {
    let state = AppState {
        db: pool,
        jwt_config: test_jwt_config(),
        cors_config: CorsConfig::from_env(),
    };
    init_router(state)
}

#[allow(dead_code)]
pub struct TestUser {
    pub id: Uuid,
    pub username: String,
    pub password: String,
    pub role: UserRole,
}

#[allow(dead_code)]
pub async fn create_test_user(
    tx: &mut Transaction<'_, Postgres>,
    username: &str,
    password: &str,
    role: UserRole,
) -> TestUser {
    let hashed = hash_password(password).unwrap();

    let id: Uuid = sqlx::query_scalar(
        "INSERT INTO users (username, password, role) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(username)
    .bind(&hashed)
    .bind(role)
    .fetch_one(&mut **tx)
    .await
    .unwrap();

    TestUser {
        id,
        username: username.to_string(),
        password: password.to_string(),
        role,
    }
}

#[allow(dead_code)]
pub async fn create_test_idea(
    tx: &mut Transaction<'_, Postgres>,
    title: &str,
    creator_id: Uuid,
) -> Uuid {
    sqlx::query_scalar("INSERT INTO ideas (title, creator_id) VALUES ($1, $2) RETURNING id")
        .bind(title)
        .bind(creator_id)
        .fetch_one(&mut **tx)
        .await
        .unwrap()
}

#[allow(dead_code)]
pub async fn create_test_vote(tx: &mut Transaction<'_, Postgres>, user_id: Uuid, idea_id: Uuid) {
    sqlx::query("INSERT INTO votes (user_id, idea_id) VALUES ($1, $2)")
        .bind(user_id)
        .bind(idea_id)
        .execute(&mut **tx)
        .await
        .unwrap();
    sqlx::query("UPDATE ideas SET votes = votes + 1 WHERE id = $1")
        .bind(idea_id)
        .execute(&mut **tx)
        .await
        .unwrap();
}

/// Issues a token signed with the test secret for the given user.
#[allow(dead_code)]
pub fn token_for(user: &TestUser) -> String {
    create_access_token(user.id, &user.username, &user.role, &test_jwt_config()).unwrap()
}

#[allow(dead_code)]
pub fn generate_unique_username() -> String {
    format!("user-{}", Uuid::new_v4())
}

#[allow(dead_code)]
pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}
