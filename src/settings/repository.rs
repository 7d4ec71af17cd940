use async_trait::async_trait;
use sqlx::{PgPool, Row};
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::{debug, instrument, warn};

use super::models::UserSettingsModel;
use crate::shared::AppError;

/// Per-user upstream credential store
#[async_trait]
pub trait ApiKeyRepository: Send + Sync {
    async fn get_settings(&self, user_id: &str) -> Result<Option<UserSettingsModel>, AppError>;
    async fn save_settings(&self, settings: &UserSettingsModel) -> Result<(), AppError>;
    async fn delete_settings(&self, user_id: &str) -> Result<(), AppError>;
}

/// In-memory implementation of ApiKeyRepository for development and testing.
/// Data is lost when the process restarts.
#[derive(Default)]
pub struct InMemoryApiKeyRepository {
    settings: RwLock<HashMap<String, UserSettingsModel>>,
}

impl InMemoryApiKeyRepository {
    pub fn new() -> Self {
        Self {
            settings: RwLock::new(HashMap::new()),
        }
    }

    /// Creates a repository with pre-populated settings
    pub fn with_settings(settings: Vec<UserSettingsModel>) -> Self {
        let map = settings
            .into_iter()
            .map(|s| (s.user_id.clone(), s))
            .collect();

        Self {
            settings: RwLock::new(map),
        }
    }
}

#[async_trait]
impl ApiKeyRepository for InMemoryApiKeyRepository {
    #[instrument(skip(self))]
    async fn get_settings(&self, user_id: &str) -> Result<Option<UserSettingsModel>, AppError> {
        let settings = self.settings.read().await.get(user_id).cloned();
        debug!(found = settings.is_some(), "Fetched settings from memory");
        Ok(settings)
    }

    #[instrument(skip(self, settings), fields(user_id = %settings.user_id))]
    async fn save_settings(&self, settings: &UserSettingsModel) -> Result<(), AppError> {
        self.settings
            .write()
            .await
            .insert(settings.user_id.clone(), settings.clone());
        debug!("Settings saved in memory");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_settings(&self, user_id: &str) -> Result<(), AppError> {
        if self.settings.write().await.remove(user_id).is_none() {
            debug!("No settings to delete in memory");
        }
        Ok(())
    }
}

/// PostgreSQL implementation of the credential store
pub struct PostgresApiKeyRepository {
    pool: PgPool,
}

impl PostgresApiKeyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates the settings table when it does not exist yet
    pub async fn ensure_schema(&self) -> Result<(), AppError> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS user_settings (
                user_id TEXT PRIMARY KEY,
                api_key TEXT NOT NULL,
                game_user_id TEXT,
                updated_at TIMESTAMPTZ NOT NULL
            )",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, "Failed to create user_settings table");
            AppError::DatabaseError(e.to_string())
        })?;
        Ok(())
    }
}

#[async_trait]
impl ApiKeyRepository for PostgresApiKeyRepository {
    #[instrument(skip(self))]
    async fn get_settings(&self, user_id: &str) -> Result<Option<UserSettingsModel>, AppError> {
        let row = sqlx::query(
            "SELECT user_id, api_key, game_user_id, updated_at FROM user_settings WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, "Failed to fetch settings from database");
            AppError::DatabaseError(e.to_string())
        })?;

        Ok(row.map(|row| UserSettingsModel {
            user_id: row.get("user_id"),
            api_key: row.get("api_key"),
            game_user_id: row.get("game_user_id"),
            updated_at: row.get("updated_at"),
        }))
    }

    #[instrument(skip(self, settings), fields(user_id = %settings.user_id))]
    async fn save_settings(&self, settings: &UserSettingsModel) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO user_settings (user_id, api_key, game_user_id, updated_at) VALUES ($1, $2, $3, $4)
             ON CONFLICT (user_id) DO UPDATE SET api_key = $2, game_user_id = $3, updated_at = $4",
        )
        .bind(&settings.user_id)
        .bind(&settings.api_key)
        .bind(&settings.game_user_id)
        .bind(settings.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, "Failed to save settings in database");
            AppError::DatabaseError(e.to_string())
        })?;

        debug!("Settings saved in database");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_settings(&self, user_id: &str) -> Result<(), AppError> {
        sqlx::query("DELETE FROM user_settings WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to delete settings from database");
                AppError::DatabaseError(e.to_string())
            })?;
        Ok(())
    }
}
