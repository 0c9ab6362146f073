//! `SeaORM` Entity for the api_key table

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Stored API key. Only the hex encoded SHA-256 digest of the token is
/// persisted, never the token itself.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "api_key")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub key: String,
    pub admin: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Digest of a raw token in the stored representation.
    pub fn key_hash(token: &str) -> String {
        hex::encode(Sha256::digest(token.as_bytes()))
    }
}
