// Static game tables used by the stats calculators.

use crate::domain::Rarity;

pub const MAX_RANK: u32 = 17;
pub const MAX_XP_LEVEL: u32 = 50;
pub const MAX_PROGRESSION_INDEX: u32 = 15;
pub const MAX_ABILITY_LEVEL: u32 = 50;
pub const MAX_ITEM_LEVEL: u32 = 11;
pub const MAX_ITEM_SLOTS: usize = 3;
/// 2x3 upgrade grid
pub const UPGRADE_SLOTS: usize = 6;
/// Battle count treated as a fully cleared campaign
pub const FULL_CAMPAIGN_BATTLES: u32 = 75;
/// Units ranked above this count as strong (past Bronze I)
pub const STRONG_RANK_THRESHOLD: u32 = 6;

/// Shards needed to reach a target star, indexed by `star - 1` (stars 1..=15)
pub const SHARD_COSTS: [u32; 15] = [
    10, 15, 15, 15, 20, 30, 40, 50, 65, 80, 100, 150, 250, 400, 500,
];

pub const RANK_NAMES: [&str; 18] = [
    "Stone I",
    "Stone II",
    "Stone III",
    "Iron I",
    "Iron II",
    "Iron III",
    "Bronze I",
    "Bronze II",
    "Bronze III",
    "Silver I",
    "Silver II",
    "Silver III",
    "Gold I",
    "Gold II",
    "Gold III",
    "Diamond I",
    "Diamond II",
    "Diamond III",
];

const RARITY_TIERS: [Rarity; 5] = [
    Rarity::Common,
    Rarity::Uncommon,
    Rarity::Rare,
    Rarity::Epic,
    Rarity::Legendary,
];

pub fn rank_name(rank: u32) -> &'static str {
    RANK_NAMES
        .get(rank as usize)
        .copied()
        .unwrap_or("Unknown")
}

pub fn rarity_for_progression(progression_index: u32) -> Rarity {
    let tier = (progression_index / 3) as usize;
    RARITY_TIERS[tier.min(RARITY_TIERS.len() - 1)]
}

/// Shard cost to reach `star`; `None` when the star has no table entry
pub fn shards_for_star(star: u32) -> Option<u32> {
    if star == 0 {
        return None;
    }
    SHARD_COSTS.get((star - 1) as usize).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, "Stone I")]
    #[case(6, "Bronze I")]
    #[case(9, "Silver I")]
    #[case(17, "Diamond III")]
    #[case(18, "Unknown")]
    fn names_rank_tiers(#[case] rank: u32, #[case] expected: &str) {
        assert_eq!(rank_name(rank), expected);
    }

    #[rstest]
    #[case(0, Rarity::Common)]
    #[case(2, Rarity::Common)]
    #[case(3, Rarity::Uncommon)]
    #[case(8, Rarity::Rare)]
    #[case(11, Rarity::Epic)]
    #[case(12, Rarity::Legendary)]
    #[case(15, Rarity::Legendary)]
    fn maps_progression_to_rarity(#[case] index: u32, #[case] expected: Rarity) {
        assert_eq!(rarity_for_progression(index), expected);
    }

    #[test]
    fn shard_table_covers_stars_one_to_fifteen() {
        assert_eq!(shards_for_star(0), None);
        assert_eq!(shards_for_star(1), Some(SHARD_COSTS[0]));
        assert_eq!(shards_for_star(15), Some(SHARD_COSTS[14]));
        assert_eq!(shards_for_star(16), None);
    }
}
