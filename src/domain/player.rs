use serde::{Deserialize, Serialize};

use super::{inventory::Inventory, progress::Progress, unit::Unit};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlayerDetails {
    pub name: String,
    pub power_level: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Player {
    pub details: PlayerDetails,
    pub units: Vec<Unit>,
    pub inventory: Inventory,
    pub progress: Progress,
}

/// Envelope returned by the upstream player endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlayerData {
    pub player: Option<Player>,
}
