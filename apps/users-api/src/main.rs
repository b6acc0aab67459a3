//! Users API - REST server

use axum::Router;
use axum_helpers::server::{create_production_app, create_router, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use migration::Migrator;
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

/// Assemble the full application router.
fn build_app(state: &AppState) -> std::io::Result<Router> {
    let router = create_router::<openapi::ApiDoc>(api::routes(state), &state.config.server)?;

    Ok(router
        .merge(health_router(state.config.app))
        .merge(api::ready_router(state.clone())))
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    info!(
        app = config.app.name,
        version = config.app.version,
        "Starting Users API"
    );

    let db = database::postgres::connect_from_config_with_retry(config.database.clone(), None)
        .await
        .map_err(|e| eyre::eyre!("PostgreSQL connection failed: {}", e))?;

    if config.run_migrations {
        database::postgres::run_migrations::<Migrator>(&db, config.app.name).await?;
    } else {
        info!("Skipping database migrations (RUN_MIGRATIONS=false)");
    }

    let state = AppState {
        config: config.clone(),
        db,
    };

    let app = build_app(&state)?;

    info!("Starting Users API on {}", state.config.server.address());

    let db = state.db.clone();
    create_production_app(
        app,
        &state.config.server,
        Duration::from_secs(30),
        async move {
            info!("Shutting down: closing PostgreSQL connections");
            match db.close().await {
                Ok(()) => info!("PostgreSQL connections closed"),
                Err(e) => tracing::error!("Failed to close PostgreSQL connections: {}", e),
            }
        },
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Users API shutdown complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use core_config::{app_info, server::ServerConfig, Environment};
    use database::postgres::PostgresConfig;
    use http_body_util::BodyExt;
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase, Value};
    use serde_json::json;
    use std::collections::BTreeMap;
    use tower::ServiceExt;

    fn state(db: sea_orm::DatabaseConnection) -> AppState {
        AppState {
            config: Config {
                app: app_info!(),
                database: PostgresConfig::new("postgresql://localhost/users"),
                server: ServerConfig::default(),
                environment: Environment::Development,
                run_migrations: false,
            },
            db,
        }
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap_or(json!(null)))
    }

    #[tokio::test]
    async fn test_ping() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let app = build_app(&state(db)).unwrap();

        let (status, body) = get(app, "/ping").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "success", "message": "pong!"}));
    }

    #[tokio::test]
    async fn test_health_reports_package() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let app = build_app(&state(db)).unwrap();

        let (status, body) = get(app, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["name"], "users_api");
    }

    #[tokio::test]
    async fn test_ready_when_database_answers() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![BTreeMap::from([(
                "?column?".to_string(),
                Value::Int(Some(1)),
            )])]])
            .into_connection();
        let app = build_app(&state(db)).unwrap();

        let (status, body) = get(app, "/ready").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["database"], "connected");
    }

    #[tokio::test]
    async fn test_not_ready_when_database_fails() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("connection refused".to_string())])
            .into_connection();
        let app = build_app(&state(db)).unwrap();

        let (status, body) = get(app, "/ready").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["database"], "disconnected");
    }

    #[tokio::test]
    async fn test_users_route_is_mounted() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<domain_users::entity::Model>::new()])
            .into_connection();
        let app = build_app(&state(db)).unwrap();

        let (status, body) = get(app, "/users/12").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"message": "User 12 does not exist"}));
    }

    #[tokio::test]
    async fn test_unknown_route_is_json_404() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let app = build_app(&state(db)).unwrap();

        let (status, body) = get(app, "/nope").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_openapi_lists_user_paths() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let app = build_app(&state(db)).unwrap();

        let (status, body) = get(app, "/api-docs/openapi.json").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["paths"].get("/users").is_some());
        assert!(body["paths"].get("/users/{id}").is_some());
        assert!(body["paths"].get("/ping").is_some());
    }
}
