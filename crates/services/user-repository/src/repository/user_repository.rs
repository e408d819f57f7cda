//! User repository implementation.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, NotSet, QueryOrder, Set};

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use common::{AppError, AppResult};
use domain::{NewUser, User, UserId};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
///
/// Callers only ever see domain `User` values; which backend answers the
/// queries is decided when the concrete store is built.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by ID, `None` when no row matches
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>>;

    /// Insert a new row and return it with its assigned ID.
    ///
    /// Always inserts, never updates.
    async fn save(&self, new_user: NewUser) -> AppResult<User>;

    /// List all users ordered by ID
    async fn list(&self) -> AppResult<Vec<User>>;
}

/// SeaORM-backed implementation of UserRepository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        let result = UserEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        tracing::debug!(id, found = result.is_some(), "looked up user");
        Ok(result.map(User::from))
    }

    async fn save(&self, new_user: NewUser) -> AppResult<User> {
        let active_model = ActiveModel {
            id: NotSet,
            name: Set(new_user.name),
            email: Set(new_user.email),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;

        tracing::debug!(id = model.id, "inserted user");
        Ok(User::from(model))
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        let models = UserEntity::find()
            .order_by_asc(user::Column::Id)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(User::from).collect())
    }
}
