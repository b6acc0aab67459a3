//! Users API routes

use axum::Router;
use domain_users::{handlers, PostgresUserRepository, UserService};

use crate::state::AppState;

/// Create users router backed by the shared pool
pub fn router(state: &AppState) -> Router {
    let repository = PostgresUserRepository::new(state.db.clone());
    let service = UserService::new(repository);
    handlers::router(service)
}
