//! Postgres-backed user repository tests
//!
//! Run with `TEST_DATABASE_URL` pointing at a scratch database:
//! `cargo test --test user_repository_test -- --ignored`

mod common;

use authflow_backend::repositories::{NewUser, PgUserRepository, RepositoryError, UserRepository};
use authflow_shared::UserRole;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

fn unique_email() -> String {
    format!("user-{}@example.com", Uuid::new_v4())
}

fn new_user(email: &str) -> NewUser {
    NewUser {
        name: "John Doe".to_string(),
        email: email.to_string(),
        password_hash: "$2b$04$notarealhashbutlongenoughforthecolumn".to_string(),
        role: UserRole::User,
    }
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_create_and_find_by_email() {
    let repo = PgUserRepository::new(common::create_test_pool().await);
    let email = unique_email();

    let created = repo.create(new_user(&email)).await.unwrap();
    assert_eq!(created.email, email);
    assert_eq!(created.role, UserRole::User);

    let found = repo.find_by_email(&email).await.unwrap().unwrap();
    assert_eq!(found, created);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_find_by_email_is_case_sensitive() {
    let repo = PgUserRepository::new(common::create_test_pool().await);
    let email = unique_email();
    repo.create(new_user(&email)).await.unwrap();

    let found = repo.find_by_email(&email.to_uppercase()).await.unwrap();
    assert!(found.is_none());
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_duplicate_email_is_rejected() {
    let repo = PgUserRepository::new(common::create_test_pool().await);
    let email = unique_email();
    repo.create(new_user(&email)).await.unwrap();

    let err = repo.create(new_user(&email)).await.unwrap_err();
    match err {
        RepositoryError::DuplicateKey(constraint) => assert_eq!(constraint, "users_email_key"),
        other => panic!("expected duplicate key, got {other:?}"),
    }
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_health_check() {
    let repo = PgUserRepository::new(common::create_test_pool().await);
    repo.health_check().await.unwrap();
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_signup_and_signin_against_postgres() {
    let app = common::postgres_app(common::create_test_pool().await);
    let email = unique_email();

    let post = |path: &'static str, body: Value| {
        let app = app.clone();
        async move {
            let request = Request::builder()
                .method("POST")
                .uri(path)
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap();
            let response = app.oneshot(request).await.unwrap();
            let status = response.status();
            let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
                .await
                .unwrap();
            (status, serde_json::from_slice::<Value>(&bytes).unwrap())
        }
    };

    let signup = json!({ "name": "John Doe", "email": email, "password": "Password@123" });
    let (status, created) = post("/v1/auth/signup", signup.clone()).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["data"]["user"]["email"], email.as_str());

    let (status, duplicate) = post("/v1/auth/signup", signup).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(duplicate["message"], "User already exists");

    let (status, signed_in) = post(
        "/v1/auth/signin",
        json!({ "email": email, "password": "Password@123" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(signed_in["data"]["user"]["id"], created["data"]["user"]["id"]);
}
