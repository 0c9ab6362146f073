use anyhow::{Context, Result};
use rand::distr::Alphanumeric;
use rand::Rng;
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait};

use crate::config::APP_CONFIG;
use crate::entities::api_key;
use crate::repositories::ApiKeyRepository;

/// Provisions the admin and assessment API keys on an empty database.
/// Raw tokens are logged once, only their digests are persisted.
pub async fn ensure_api_keys(db: &DatabaseConnection) -> Result<()> {
    let existing = api_key::Entity::find()
        .count(db)
        .await
        .context("Failed to check existing api keys")?;

    if existing > 0 {
        tracing::info!("Api keys already exist, skipping initialization");
        return Ok(());
    }

    tracing::info!("Creating default api keys...");

    let admin_token = APP_CONFIG
        .admin_api_key
        .clone()
        .unwrap_or_else(generate_token);
    let assessment_token = APP_CONFIG
        .assessment_api_key
        .clone()
        .unwrap_or_else(generate_token);

    ApiKeyRepository::create(db, api_key::Model::key_hash(&admin_token), true)
        .await
        .context("Failed to insert admin api key")?;

    ApiKeyRepository::create(db, api_key::Model::key_hash(&assessment_token), false)
        .await
        .context("Failed to insert assessment api key")?;

    tracing::info!("✅ Api keys created successfully!");
    tracing::info!("  Admin key: {}", admin_token);
    tracing::info!("  Assessment key: {}", assessment_token);
    tracing::warn!("⚠️  Store these tokens now, only their digests are kept in the database!");

    Ok(())
}

fn generate_token() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect()
}
