use serde::{Deserialize, Serialize};

use crate::domain::{Alliance, CampaignType};

// Derived records. All of them are recomputed from domain snapshots on every
// query and have no lifecycle of their own.

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllianceStrengthData {
    pub alliance: Alliance,
    pub unit_count: usize,
    pub avg_rank: f64,
    pub avg_xp_level: f64,
    pub avg_stars: f64,
    /// Units ranked above Bronze I
    pub strong_units: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FactionStrengthData {
    pub faction: String,
    pub unit_count: usize,
    pub avg_rank: f64,
    pub avg_xp_level: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WeaknessKind {
    FewStrongUnits,
    SmallRoster,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Weakness {
    pub alliance: Alliance,
    pub kind: WeaknessKind,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReadinessBucket {
    Rank,
    Xp,
    Stars,
    Abilities,
    Items,
}

/// Readiness composite; every subscore is rounded before summing
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadinessBreakdown {
    pub rank: f64,
    pub xp: f64,
    pub stars: f64,
    pub abilities: f64,
    pub items: f64,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitReadiness {
    pub unit_id: String,
    pub name: String,
    pub breakdown: ReadinessBreakdown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignWall {
    pub battle_index: u32,
    pub attempts_used: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignAnalysisData {
    pub id: String,
    pub name: String,
    pub campaign_type: CampaignType,
    pub battles_recorded: usize,
    pub max_battle_index: u32,
    pub progress_percent: u32,
    pub total_attempts_used: u32,
    /// Sorted by attempts used, highest first
    pub walls: Vec<CampaignWall>,
    pub average_attempts: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbilityCompletion {
    pub unlocked: usize,
    pub locked: usize,
    pub total_levels: u32,
    pub completion_percent: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpgradeCompletion {
    pub filled: usize,
    pub total: usize,
    pub completion_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitEfficiencyData {
    pub unit_id: String,
    pub raids: usize,
    pub total_damage: f64,
    pub average_damage: f64,
    pub average_efficiency: f64,
    pub average_power: f64,
}
