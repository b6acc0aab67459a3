use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{IdPath, ValidatedJson, ValidationRejection};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::UserResult;
use crate::models::{CreateUser, MessageResponse, UserResponse};
use crate::repository::UserRepository;
use crate::service::UserService;

pub const TAG: &str = "Users";

/// OpenAPI documentation for the Users API
#[derive(OpenApi)]
#[openapi(
    paths(list_users, create_user, get_user, delete_user),
    components(schemas(CreateUser, UserResponse, MessageResponse)),
    tags((name = TAG, description = "User management endpoints"))
)]
pub struct ApiDoc;

/// Create the users router with all HTTP endpoints
pub fn router<R: UserRepository + 'static>(service: UserService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/{id}", get(get_user).delete(delete_user))
        .with_state(shared_service)
}

/// List all users ordered by id
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    responses(
        (status = 200, description = "All users, ascending id", body = Vec<UserResponse>),
        (status = 500, description = "Internal error", body = MessageResponse)
    )
)]
async fn list_users<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
) -> UserResult<Json<Vec<UserResponse>>> {
    let users = service.list_users().await?;
    Ok(Json(users))
}

/// Create a new user
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateUser,
    responses(
        (status = 201, description = "User created", body = MessageResponse,
            example = json!({"message": "mgriffes@gmail.com was added!"})),
        (status = 400, description = "Invalid payload or email already exists", body = MessageResponse,
            example = json!({"message": "Sorry. That email already exists."})),
        (status = 500, description = "Internal error", body = MessageResponse)
    )
)]
async fn create_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    payload: Result<ValidatedJson<CreateUser>, ValidationRejection>,
) -> UserResult<impl IntoResponse> {
    let ValidatedJson(input) = payload?;
    let message = service.create_user(input).await?;
    Ok((StatusCode::CREATED, Json(message)))
}

/// Get a user by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 404, description = "User does not exist", body = MessageResponse,
            example = json!({"message": "User 999 does not exist"})),
        (status = 500, description = "Internal error", body = MessageResponse)
    )
)]
async fn get_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    IdPath(id): IdPath,
) -> UserResult<Json<UserResponse>> {
    let user = service.get_user(id).await?;
    Ok(Json(user))
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User removed", body = MessageResponse,
            example = json!({"message": "mgriffes@gmail.com was removed!"})),
        (status = 404, description = "User does not exist", body = MessageResponse),
        (status = 500, description = "Internal error", body = MessageResponse)
    )
)]
async fn delete_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    IdPath(id): IdPath,
) -> UserResult<Json<MessageResponse>> {
    let message = service.delete_user(id).await?;
    Ok(Json(message))
}
