use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Database model for the user_settings table
#[derive(Clone, FromRow, Serialize, Deserialize, PartialEq)]
pub struct UserSettingsModel {
    pub user_id: String,              // Identity-provider user id
    pub api_key: String,              // Upstream game API credential
    pub game_user_id: Option<String>, // Player id as it appears in upstream raid data
    pub updated_at: DateTime<Utc>,
}

impl UserSettingsModel {
    pub fn new(user_id: String, api_key: String, game_user_id: Option<String>) -> Self {
        Self {
            user_id,
            api_key,
            game_user_id,
            updated_at: Utc::now(),
        }
    }
}

// Keeps the credential out of logs and panic messages
impl std::fmt::Debug for UserSettingsModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserSettingsModel")
            .field("user_id", &self.user_id)
            .field("api_key", &"<redacted>")
            .field("game_user_id", &self.game_user_id)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}
