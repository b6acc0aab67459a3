use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, QueryOrder, SqlErr,
    TransactionTrait,
};

use crate::{
    entity,
    error::{UserError, UserResult},
    models::{CreateUser, User},
    repository::UserRepository,
};

/// PostgreSQL implementation of UserRepository using SeaORM
///
/// Email uniqueness is left to the `UNIQUE` constraint on `users.email`;
/// a violation is reported as [`UserError::DuplicateEmail`].
#[derive(Clone)]
pub struct PostgresUserRepository {
    db: DatabaseConnection,
}

impl PostgresUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn classify_insert_error(err: DbErr, email: String) -> UserError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            tracing::debug!(%email, %detail, "Unique constraint rejected insert");
            UserError::DuplicateEmail(email)
        }
        _ => UserError::Internal(format!("Database error: {}", err)),
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, input: CreateUser) -> UserResult<User> {
        let email = input.email.clone();
        let active_model: entity::ActiveModel = input.into();

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| classify_insert_error(e, email))?;

        tracing::info!(user_id = model.id, email = %model.email, "Created user");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: i32) -> UserResult<Option<User>> {
        let model = entity::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    async fn list(&self) -> UserResult<Vec<User>> {
        let models = entity::Entity::find()
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn delete(&self, id: i32) -> UserResult<Option<User>> {
        let txn = self.db.begin().await?;

        let Some(model) = entity::Entity::find_by_id(id).one(&txn).await? else {
            txn.rollback().await?;
            return Ok(None);
        };

        // A concurrent delete may have removed the row after our read
        let result = entity::Entity::delete_by_id(id).exec(&txn).await?;
        if result.rows_affected == 0 {
            txn.rollback().await?;
            return Ok(None);
        }

        txn.commit().await?;

        tracing::info!(user_id = id, email = %model.email, "Deleted user");
        Ok(Some(model.into()))
    }
}
