use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, Set};

use crate::entities::api_key;

pub struct ApiKeyRepository;

impl ApiKeyRepository {
    pub async fn find_all(db: &DatabaseConnection) -> Result<Vec<api_key::Model>, DbErr> {
        api_key::Entity::find().all(db).await
    }

    /// Stores a key digest. `key` is the hex digest, never the raw token.
    pub async fn create(
        db: &DatabaseConnection,
        key: String,
        admin: bool,
    ) -> Result<api_key::Model, DbErr> {
        let active = api_key::ActiveModel {
            key: Set(key),
            admin: Set(admin),
        };
        active.insert(db).await
    }
}
