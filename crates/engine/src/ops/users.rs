use sea_orm::{QueryOrder, prelude::*};

use crate::{EngineError, ResultEngine, User, UserId, users};

use super::Engine;

impl Engine {
    /// Look a user up by its external id.
    pub async fn user(&self, id: &UserId) -> ResultEngine<User> {
        users::Entity::find_by_id(id.as_str().to_string())
            .one(&self.database)
            .await?
            .map(User::from)
            .ok_or_else(|| EngineError::UserNotFound(id.to_string()))
    }

    /// Store a new user. Users never come through the HTTP API, this is for
    /// the admin tooling.
    pub async fn create_user(&self, user: User) -> ResultEngine<User> {
        let exists = users::Entity::find_by_id(user.id.as_str().to_string())
            .one(&self.database)
            .await?
            .is_some();
        if exists {
            return Err(EngineError::ExistingKey(user.id.to_string()));
        }

        users::ActiveModel::from(&user)
            .insert(&self.database)
            .await?;
        tracing::info!("created user {}", user.id);
        Ok(user)
    }

    /// All users ordered by id.
    pub async fn users(&self) -> ResultEngine<Vec<User>> {
        let models = users::Entity::find()
            .order_by_asc(users::Column::Id)
            .all(&self.database)
            .await?;
        Ok(models.into_iter().map(User::from).collect())
    }
}
