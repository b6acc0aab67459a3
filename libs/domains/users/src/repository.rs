use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{UserError, UserResult};
use crate::models::{CreateUser, User};

/// Repository trait for User persistence
///
/// Implementations must enforce email uniqueness atomically: when two
/// creates race on the same email, exactly one succeeds and the other
/// returns [`UserError::DuplicateEmail`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user; the store assigns the id
    async fn create(&self, input: CreateUser) -> UserResult<User>;

    /// Get a user by ID
    async fn get_by_id(&self, id: i32) -> UserResult<Option<User>>;

    /// All users ordered by ascending id
    async fn list(&self) -> UserResult<Vec<User>>;

    /// Delete a user by ID, returning the removed row if it existed
    async fn delete(&self, id: i32) -> UserResult<Option<User>>;
}

#[derive(Debug, Default)]
struct Store {
    users: BTreeMap<i32, User>,
    last_id: i32,
}

/// In-memory implementation of UserRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, input: CreateUser) -> UserResult<User> {
        // Uniqueness check and insert happen under one write lock
        let mut store = self.store.write().await;

        if store.users.values().any(|u| u.email == input.email) {
            return Err(UserError::DuplicateEmail(input.email));
        }

        store.last_id += 1;
        let user = User {
            id: store.last_id,
            username: input.username,
            email: input.email,
            created_at: Utc::now(),
        };
        store.users.insert(user.id, user.clone());

        tracing::info!(user_id = user.id, email = %user.email, "Created user");
        Ok(user)
    }

    async fn get_by_id(&self, id: i32) -> UserResult<Option<User>> {
        let store = self.store.read().await;
        Ok(store.users.get(&id).cloned())
    }

    async fn list(&self) -> UserResult<Vec<User>> {
        let store = self.store.read().await;
        Ok(store.users.values().cloned().collect())
    }

    async fn delete(&self, id: i32) -> UserResult<Option<User>> {
        let mut store = self.store.write().await;

        let removed = store.users.remove(&id);
        if let Some(ref user) = removed {
            tracing::info!(user_id = id, email = %user.email, "Deleted user");
        }
        Ok(removed)
    }
}
