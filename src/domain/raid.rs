use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DamageType {
    Bomb,
    #[default]
    #[serde(other)]
    Battle,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HeroDetail {
    pub unit_id: String,
    pub power: u64,
}

/// One attack against a raid boss within a season
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RaidEntry {
    pub user_id: String,
    pub tier: u32,
    pub set: u32,
    pub encounter_index: u32,
    pub encounter_type: Option<String>,
    pub unit_id: Option<String>,
    #[serde(rename = "type")]
    pub boss_type: Option<String>,
    pub rarity: Option<String>,
    #[serde(deserialize_with = "damage_amount")]
    pub damage_dealt: u64,
    pub damage_type: DamageType,
    pub remaining_hp: u64,
    pub max_hp: u64,
    pub started_on: Option<DateTime<Utc>>,
    pub completed_on: Option<DateTime<Utc>>,
    pub hero_details: Vec<HeroDetail>,
}

impl RaidEntry {
    pub fn total_power(&self) -> u64 {
        self.hero_details.iter().map(|h| h.power).sum()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GuildRaidData {
    pub season: u32,
    pub season_config_id: Option<String>,
    pub entries: Vec<RaidEntry>,
}

/// Raid data keyed by numeric season
pub type SeasonRaidData = BTreeMap<u32, GuildRaidData>;

#[derive(Deserialize)]
#[serde(untagged)]
enum RawDamage {
    Number(u64),
    Float(f64),
    Text(String),
}

/// Upstream sends damage either as a number or a numeric string; normalize once here
fn damage_amount<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawDamage>::deserialize(deserializer)?;
    Ok(match raw {
        Some(RawDamage::Number(n)) => n,
        Some(RawDamage::Float(f)) if f.is_finite() && f > 0.0 => f.trunc() as u64,
        Some(RawDamage::Float(_)) => 0,
        Some(RawDamage::Text(s)) => parse_leading_integer(&s),
        None => 0,
    })
}

/// Leading-digit parse: "12345" -> 12345, "987abc" -> 987, "abc" -> 0
fn parse_leading_integer(s: &str) -> u64 {
    let digits: String = s
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().unwrap_or(0)
}
