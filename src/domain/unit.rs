use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use strum_macros::EnumIter;

use crate::constants;

/// Top-level grouping every unit belongs to
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, EnumIter,
)]
pub enum Alliance {
    Imperial,
    Xenos,
    Chaos,
}

impl fmt::Display for Alliance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Alliance::Imperial => "Imperial",
                Alliance::Xenos => "Xenos",
                Alliance::Chaos => "Chaos",
            }
        )
    }
}

impl TryFrom<&str> for Alliance {
    type Error = String;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "Imperial" => Ok(Alliance::Imperial),
            "Xenos" => Ok(Alliance::Xenos),
            "Chaos" => Ok(Alliance::Chaos),
            _ => Err(s.to_string()),
        }
    }
}

/// Rarity tier, one per 3 steps of progression index
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, EnumIter,
)]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Rarity::Common => "Common",
                Rarity::Uncommon => "Uncommon",
                Rarity::Rare => "Rare",
                Rarity::Epic => "Epic",
                Rarity::Legendary => "Legendary",
            }
        )
    }
}

impl TryFrom<&str> for Rarity {
    type Error = String;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "Common" => Ok(Rarity::Common),
            "Uncommon" => Ok(Rarity::Uncommon),
            "Rare" => Ok(Rarity::Rare),
            "Epic" => Ok(Rarity::Epic),
            "Legendary" => Ok(Rarity::Legendary),
            _ => Err(s.to_string()),
        }
    }
}

/// An ability slot; level 0 means the ability is still locked
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Ability {
    pub id: String,
    pub level: u32,
}

impl Ability {
    pub fn is_unlocked(&self) -> bool {
        self.level > 0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EquippedItem {
    pub slot_id: String,
    pub id: String,
    pub name: Option<String>,
    pub level: u32,
    pub rarity: Option<String>,
}

/// One character owned by a player
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Unit {
    pub id: String,
    pub name: Option<String>,
    pub faction: Option<String>,
    #[serde(deserialize_with = "lenient_alliance")]
    pub grand_alliance: Option<Alliance>,
    pub progression_index: u32,
    pub xp: u64,
    pub xp_level: u32,
    pub rank: u32,
    pub abilities: Vec<Ability>,
    /// Filled indices of the 2x3 upgrade grid
    pub upgrades: Vec<u8>,
    pub items: Vec<EquippedItem>,
    pub shards: u32,
}

impl Unit {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }

    pub fn rarity(&self) -> Rarity {
        constants::rarity_for_progression(self.progression_index)
    }

    pub fn rank_name(&self) -> &'static str {
        constants::rank_name(self.rank)
    }

    pub fn unlocked_abilities(&self) -> impl Iterator<Item = &Ability> {
        self.abilities.iter().filter(|a| a.is_unlocked())
    }

    /// Equipped items, capped at the number of slots a unit has
    pub fn equipped_items(&self) -> &[EquippedItem] {
        let len = self.items.len().min(constants::MAX_ITEM_SLOTS);
        &self.items[..len]
    }

    /// Count of distinct filled slots inside the upgrade grid
    pub fn upgrade_slots_filled(&self) -> usize {
        let mut seen = [false; constants::UPGRADE_SLOTS];
        for &slot in &self.upgrades {
            if let Some(filled) = seen.get_mut(slot as usize) {
                *filled = true;
            }
        }
        seen.iter().filter(|filled| **filled).count()
    }
}

/// Unknown alliance strings map to `None` instead of failing the whole payload
fn lenient_alliance<'de, D>(deserializer: D) -> Result<Option<Alliance>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|s| Alliance::try_from(s.as_str()).ok()))
}
