mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;

use common::{
    body_json, create_test_idea, create_test_user, create_test_vote, generate_unique_username,
    setup_test_app,
};
use ideaboard::modules::users::model::UserRole;

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

#[sqlx::test(migrations = "./migrations")]
async fn test_signup_success(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let username = generate_unique_username();

    let response = app
        .oneshot(post_json(
            "/auth/signup",
            json!({ "username": username, "password": "secret1" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["username"], username.as_str());
    assert_eq!(body["role"], "user");
    assert!(body.get("id").is_some());
    // The password (hashed or not) must never appear in a response.
    assert!(body.get("password").is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_signup_stores_hash_not_plaintext(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let username = generate_unique_username();
    let password = "secret1";

    let response = app
        .oneshot(post_json(
            "/auth/signup",
            json!({ "username": username, "password": password }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let stored: String = sqlx::query_scalar("SELECT password FROM users WHERE username = $1")
        .bind(&username)
        .fetch_one(&pool)
        .await
        .unwrap();

    assert_ne!(stored, password);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_signup_duplicate_username(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let username = generate_unique_username();

    let first = app
        .clone()
        .oneshot(post_json(
            "/auth/signup",
            json!({ "username": username, "password": "secret1" }),
        ))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = app
        .oneshot(post_json(
            "/auth/signup",
            json!({ "username": username, "password": "secret2" }),
        ))
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_signup_rejects_short_password(pool: PgPool) {
    let app = setup_test_app(pool.clone());

    let response = app
        .oneshot(post_json(
            "/auth/signup",
            json!({ "username": generate_unique_username(), "password": "123" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_signup_rejects_missing_fields(pool: PgPool) {
    let app = setup_test_app(pool.clone());

    let response = app
        .oneshot(post_json(
            "/auth/signup",
            json!({ "username": generate_unique_username() }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_success(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let username = generate_unique_username();
    create_test_user(&mut tx, &username, "testpass123", UserRole::User).await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone());

    let response = app
        .oneshot(post_json(
            "/auth/login",
            json!({ "username": username, "password": "testpass123" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert!(body.get("access_token").is_some());
    assert_eq!(body["votedPolls"], json!([]));
    assert!(body.get("password").is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_returns_voted_idea_ids(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let user = create_test_user(
        &mut tx,
        &generate_unique_username(),
        "testpass123",
        UserRole::User,
    )
    .await;
    let idea_id = create_test_idea(&mut tx, "Dark mode", user.id).await;
    create_test_vote(&mut tx, user.id, idea_id).await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone());

    let response = app
        .oneshot(post_json(
            "/auth/login",
            json!({ "username": user.username, "password": "testpass123" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["votedPolls"], json!([idea_id]));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_wrong_password(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let username = generate_unique_username();
    create_test_user(&mut tx, &username, "testpass123", UserRole::User).await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone());

    let response = app
        .oneshot(post_json(
            "/auth/login",
            json!({ "username": username, "password": "wrongpass" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_unknown_user(pool: PgPool) {
    let app = setup_test_app(pool.clone());

    let response = app
        .oneshot(post_json(
            "/auth/login",
            json!({ "username": "nobody-here", "password": "whatever" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
