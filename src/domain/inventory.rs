use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::unit::Alliance;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InventoryItem {
    pub id: String,
    pub name: Option<String>,
    pub level: u32,
    pub amount: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpgradeMaterial {
    pub id: String,
    pub name: Option<String>,
    pub amount: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShardStack {
    pub id: String,
    pub name: Option<String>,
    pub amount: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct XpBook {
    pub id: String,
    pub rarity: String,
    pub amount: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AbilityBadge {
    pub name: String,
    pub rarity: String,
    pub amount: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Component {
    pub name: String,
    pub grand_alliance: Option<String>,
    pub amount: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ForgeBadge {
    pub name: String,
    pub rarity: String,
    pub amount: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Orb {
    pub rarity: String,
    pub amount: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RequisitionOrders {
    pub regular: u64,
    pub blessed: u64,
}

/// Per-player stockpile keyed by category
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Inventory {
    pub items: Vec<InventoryItem>,
    pub upgrades: Vec<UpgradeMaterial>,
    pub shards: Vec<ShardStack>,
    pub xp_books: Vec<XpBook>,
    pub ability_badges: BTreeMap<Alliance, Vec<AbilityBadge>>,
    pub components: BTreeMap<Alliance, Vec<Component>>,
    pub forge_badges: Vec<ForgeBadge>,
    pub orbs: BTreeMap<Alliance, Vec<Orb>>,
    pub requisition_orders: RequisitionOrders,
    pub reset_stones: u64,
}

impl Inventory {
    pub fn total_shards(&self) -> u64 {
        self.shards.iter().map(|s| s.amount).sum()
    }

    pub fn total_upgrade_materials(&self) -> u64 {
        self.upgrades.iter().map(|u| u.amount).sum()
    }

    pub fn total_items(&self) -> u64 {
        self.items.iter().map(|i| i.amount).sum()
    }

    /// XP book amounts summed per rarity tag
    pub fn xp_books_by_rarity(&self) -> BTreeMap<String, u64> {
        sum_by(self.xp_books.iter().map(|b| (b.rarity.clone(), b.amount)))
    }

    pub fn forge_badges_by_rarity(&self) -> BTreeMap<String, u64> {
        sum_by(self.forge_badges.iter().map(|b| (b.rarity.clone(), b.amount)))
    }

    pub fn ability_badges_by_alliance(&self) -> BTreeMap<Alliance, u64> {
        self.ability_badges
            .iter()
            .map(|(alliance, badges)| (*alliance, badges.iter().map(|b| b.amount).sum()))
            .collect()
    }

    pub fn components_by_alliance(&self) -> BTreeMap<Alliance, u64> {
        self.components
            .iter()
            .map(|(alliance, parts)| (*alliance, parts.iter().map(|c| c.amount).sum()))
            .collect()
    }

    pub fn orbs_by_alliance(&self) -> BTreeMap<Alliance, u64> {
        self.orbs
            .iter()
            .map(|(alliance, orbs)| (*alliance, orbs.iter().map(|o| o.amount).sum()))
            .collect()
    }
}

fn sum_by(pairs: impl Iterator<Item = (String, u64)>) -> BTreeMap<String, u64> {
    let mut totals = BTreeMap::new();
    for (key, amount) in pairs {
        *totals.entry(key).or_insert(0) += amount;
    }
    totals
}
