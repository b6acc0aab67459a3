//! API routes module

pub mod health;
pub mod users;

use axum::{routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::state::AppState;

/// Create all API routes
///
/// Returns a stateless Router; sub-routers have their state applied.
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .nest("/users", users::router(state))
        .route("/ping", get(ping))
}

/// Creates a router with the /ready endpoint that checks the database.
pub fn ready_router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PingResponse {
    #[schema(example = "success")]
    pub status: String,
    #[schema(example = "pong!")]
    pub message: String,
}

/// Liveness probe
#[utoipa::path(
    get,
    path = "/ping",
    tag = "Health",
    responses(
        (status = 200, description = "Service is up", body = PingResponse)
    )
)]
pub async fn ping() -> Json<PingResponse> {
    Json(PingResponse {
        status: "success".to_string(),
        message: "pong!".to_string(),
    })
}
