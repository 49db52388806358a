mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;

use common::{body_json, setup_test_app};
use ideaboard::modules::users::model::UserRole;
use ideaboard::seed::ensure_default_admin;

#[sqlx::test(migrations = "./migrations")]
async fn test_seed_creates_default_admin(pool: PgPool) {
    ensure_default_admin(&pool).await.unwrap();

    let role: UserRole = sqlx::query_scalar("SELECT role FROM users WHERE username = 'admin'")
        .fetch_one(&pool)
        .await
        .unwrap();

    assert_eq!(role, UserRole::Admin);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_seed_is_idempotent(pool: PgPool) {
    ensure_default_admin(&pool).await.unwrap();
    ensure_default_admin(&pool).await.unwrap();

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE username = 'admin'")
        .fetch_one(&pool)
        .await
        .unwrap();

    assert_eq!(count, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_seed_does_not_reset_existing_admin_password(pool: PgPool) {
    ensure_default_admin(&pool).await.unwrap();

    let before: String = sqlx::query_scalar("SELECT password FROM users WHERE username = 'admin'")
        .fetch_one(&pool)
        .await
        .unwrap();

    ensure_default_admin(&pool).await.unwrap();

    let after: String = sqlx::query_scalar("SELECT password FROM users WHERE username = 'admin'")
        .fetch_one(&pool)
        .await
        .unwrap();

    assert_eq!(before, after);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_seeded_admin_can_log_in(pool: PgPool) {
    ensure_default_admin(&pool).await.unwrap();

    let app = setup_test_app(pool.clone());

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/auth/login")
                .header("content-type", "application/json")
                .body(Body::from(
                    serde_json::to_string(&json!({
                        "username": "admin",
                        "password": "admin123",
                    }))
                    .unwrap(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert!(body.get("access_token").is_some());
}
