//! Handler tests for the Users domain
//!
//! These tests drive the users router with in-memory storage and check:
//! - Request deserialization and validation
//! - Response bodies and HTTP status codes
//!
//! Only the domain router is exercised, not the full application.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_users::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt; // For oneshot()

fn app(repo: InMemoryUserRepository) -> Router {
    handlers::router(UserService::new(repo))
}

async fn json_body(body: Body) -> Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_json(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::delete(uri).body(Body::empty()).unwrap()
}

async fn seed(repo: &InMemoryUserRepository, username: &str, email: &str) -> User {
    repo.create(CreateUser::new(username, email)).await.unwrap()
}

#[tokio::test]
async fn test_create_user_returns_201_with_message() {
    let repo = InMemoryUserRepository::new();

    let response = app(repo.clone())
        .oneshot(post_json(
            json!({"username": "midCenturyDude7", "email": "mgriffes@gmail.com"}).to_string(),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(
        json_body(response.into_body()).await,
        json!({"message": "mgriffes@gmail.com was added!"})
    );

    let stored = repo.list().await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].username, "midCenturyDude7");
}

#[tokio::test]
async fn test_create_duplicate_email_returns_400() {
    let repo = InMemoryUserRepository::new();
    seed(&repo, "first", "mgriffes@gmail.com").await;

    let response = app(repo.clone())
        .oneshot(post_json(
            json!({"username": "second", "email": "mgriffes@gmail.com"}).to_string(),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(response.into_body()).await,
        json!({"message": "Sorry. That email already exists."})
    );
    assert_eq!(repo.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_create_invalid_payloads_return_400() {
    let payloads = [
        json!({}).to_string(),
        json!({"username": "only"}).to_string(),
        json!({"email": "only@example.com"}).to_string(),
        json!({"username": 7, "email": "a@example.com"}).to_string(),
        json!({"username": "x".repeat(129), "email": "a@example.com"}).to_string(),
        "not json".to_string(),
        String::new(),
    ];

    for payload in payloads {
        let repo = InMemoryUserRepository::new();
        let response = app(repo.clone())
            .oneshot(post_json(payload.clone()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "payload: {payload}");
        assert_eq!(
            json_body(response.into_body()).await,
            json!({"message": "Input payload validation failed"})
        );
        assert!(repo.list().await.unwrap().is_empty());
    }
}

#[tokio::test]
async fn test_create_without_content_type_returns_400() {
    let request = Request::builder()
        .method("POST")
        .uri("/")
        .body(Body::from(
            json!({"username": "a", "email": "a@example.com"}).to_string(),
        ))
        .unwrap();

    let response = app(InMemoryUserRepository::new())
        .oneshot(request)
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_user_returns_public_fields() {
    let repo = InMemoryUserRepository::new();
    let user = seed(&repo, "midCenturyDude7", "mgriffes@gmail.com").await;

    let response = app(repo)
        .oneshot(get(&format!("/{}", user.id)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response.into_body()).await,
        json!({"id": user.id, "username": "midCenturyDude7", "email": "mgriffes@gmail.com"})
    );
}

#[tokio::test]
async fn test_get_missing_user_returns_404() {
    let response = app(InMemoryUserRepository::new())
        .oneshot(get("/999"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        json_body(response.into_body()).await,
        json!({"message": "User 999 does not exist"})
    );
}

#[tokio::test]
async fn test_get_non_integer_id_returns_404() {
    let response = app(InMemoryUserRepository::new())
        .oneshot(get("/abc"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_users_ordered_by_id() {
    let repo = InMemoryUserRepository::new();
    seed(&repo, "a", "a@example.com").await;
    seed(&repo, "b", "b@example.com").await;
    seed(&repo, "c", "c@example.com").await;

    let response = app(repo).oneshot(get("/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response.into_body()).await;
    let ids: Vec<i64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert_eq!(body[0], json!({"id": 1, "username": "a", "email": "a@example.com"}));
}

#[tokio::test]
async fn test_list_users_empty() {
    let response = app(InMemoryUserRepository::new())
        .oneshot(get("/"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response.into_body()).await, json!([]));
}

#[tokio::test]
async fn test_delete_user_returns_removed_message() {
    let repo = InMemoryUserRepository::new();
    let user = seed(&repo, "gone", "gone@example.com").await;
    seed(&repo, "kept", "kept@example.com").await;

    let response = app(repo.clone())
        .oneshot(delete(&format!("/{}", user.id)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response.into_body()).await,
        json!({"message": "gone@example.com was removed!"})
    );

    let remaining = repo.list().await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].email, "kept@example.com");
}

#[tokio::test]
async fn test_delete_missing_user_returns_404() {
    let repo = InMemoryUserRepository::new();
    seed(&repo, "kept", "kept@example.com").await;

    let response = app(repo.clone()).oneshot(delete("/42")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        json_body(response.into_body()).await,
        json!({"message": "User 42 does not exist"})
    );
    assert_eq!(repo.list().await.unwrap().len(), 1);
}
