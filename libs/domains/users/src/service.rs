use std::sync::Arc;
use validator::Validate;

use crate::error::{UserError, UserResult};
use crate::models::{CreateUser, MessageResponse, UserResponse};
use crate::repository::UserRepository;

/// Service layer for User business logic
#[derive(Clone)]
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Validate and insert a new user
    pub async fn create_user(&self, input: CreateUser) -> UserResult<MessageResponse> {
        input.validate().map_err(|e| {
            tracing::debug!(error = %e, "Create payload failed validation");
            UserError::Validation
        })?;

        let user = self.repository.create(input).await?;
        Ok(MessageResponse::added(&user.email))
    }

    /// Get a user by ID
    pub async fn get_user(&self, id: i32) -> UserResult<UserResponse> {
        self.repository
            .get_by_id(id)
            .await?
            .map(Into::into)
            .ok_or(UserError::NotFound(id))
    }

    /// List all users ordered by id
    pub async fn list_users(&self) -> UserResult<Vec<UserResponse>> {
        let users = self.repository.list().await?;
        Ok(users.into_iter().map(Into::into).collect())
    }

    /// Delete a user
    pub async fn delete_user(&self, id: i32) -> UserResult<MessageResponse> {
        let user = self
            .repository
            .delete(id)
            .await?
            .ok_or(UserError::NotFound(id))?;

        Ok(MessageResponse::removed(&user.email))
    }
}
