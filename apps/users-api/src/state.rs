//! Application state management

use database::postgres::DatabaseConnection;

/// Shared application state
///
/// `DatabaseConnection` wraps a pool, so cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub db: DatabaseConnection,
}
