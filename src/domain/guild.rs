use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GuildRole {
    Leader,
    CoLeader,
    Officer,
    #[default]
    #[serde(other)]
    Member,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GuildMember {
    pub user_id: String,
    pub role: GuildRole,
    pub level: u32,
    pub last_activity_on: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Guild {
    pub guild_id: String,
    pub guild_tag: String,
    pub name: String,
    pub level: u32,
    pub members: Vec<GuildMember>,
    pub guild_raid_seasons: Vec<u32>,
}

impl Guild {
    pub fn member(&self, user_id: &str) -> Option<&GuildMember> {
        self.members.iter().find(|m| m.user_id == user_id)
    }
}

/// Envelope returned by the upstream guild endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GuildData {
    pub guild: Option<Guild>,
}
