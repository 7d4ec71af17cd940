use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::{Alliance, CampaignType, GuildRole, Rarity, RequisitionOrders};
use crate::stats::{AllianceStrengthData, FactionStrengthData, UnitReadiness, Weakness};

/// Snapshot of every derived metric for one player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsExport {
    pub overview: OverviewSection,
    pub roster: RosterSection,
    pub resources: ResourcesSection,
    pub raid: Option<RaidSection>,
    pub upgrade_priorities: Vec<UpgradePriority>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewSection {
    pub player_name: String,
    pub power_level: u64,
    pub total_units: usize,
    pub avg_rank: f64,
    pub avg_xp_level: f64,
    pub avg_stars: f64,
    pub rarity_counts: BTreeMap<Rarity, usize>,
    pub guild: Option<GuildSummary>,
    pub tokens: Vec<TokenSummary>,
    pub campaigns: Vec<CampaignSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuildSummary {
    pub name: String,
    pub tag: String,
    pub level: u32,
    pub member_count: usize,
    /// The exporting player's role, when they appear in the roster
    pub role: Option<GuildRole>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenSummary {
    pub mode: String,
    pub current: u32,
    pub max: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignSummary {
    pub name: String,
    pub campaign_type: CampaignType,
    pub progress_percent: u32,
    pub walls: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterSection {
    pub alliance_strength: Vec<AllianceStrengthData>,
    pub faction_strength: Vec<FactionStrengthData>,
    pub weaknesses: Vec<Weakness>,
    pub top_units: Vec<UnitReadiness>,
    pub avg_ability_completion: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourcesSection {
    pub total_shards: u64,
    pub total_upgrade_materials: u64,
    pub xp_books: BTreeMap<String, u64>,
    pub ability_badges: BTreeMap<Alliance, u64>,
    pub components: BTreeMap<Alliance, u64>,
    pub orbs: BTreeMap<Alliance, u64>,
    pub forge_badges: BTreeMap<String, u64>,
    pub requisition_orders: RequisitionOrders,
    pub reset_stones: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RaidSection {
    pub season: u32,
    pub attacks: usize,
    pub battle_attacks: usize,
    pub bomb_attacks: usize,
    pub total_damage: u64,
    pub average_damage: f64,
    /// Total damage over total team power across the player's attacks
    pub average_efficiency: f64,
    pub top_units: Vec<RaidUnitDamage>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RaidUnitDamage {
    pub unit_id: String,
    pub attacks: usize,
    pub average_damage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpgradePriority {
    pub unit_id: String,
    pub name: String,
    pub readiness: f64,
    pub reasons: Vec<String>,
}
