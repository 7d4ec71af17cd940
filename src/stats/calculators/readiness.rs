use crate::constants::{
    MAX_ABILITY_LEVEL, MAX_ITEM_LEVEL, MAX_ITEM_SLOTS, MAX_PROGRESSION_INDEX, MAX_RANK,
    MAX_XP_LEVEL,
};
use crate::domain::Unit;
use crate::stats::{
    average, round1, ReadinessBreakdown, ReadinessBucket, ReadinessComponent, UnitReadiness,
};

pub struct RankComponent;

impl ReadinessComponent for RankComponent {
    fn bucket(&self) -> ReadinessBucket {
        ReadinessBucket::Rank
    }

    fn max_points(&self) -> f64 {
        25.0
    }

    fn ratio(&self, unit: &Unit) -> f64 {
        unit.rank as f64 / MAX_RANK as f64
    }
}

pub struct XpComponent;

impl ReadinessComponent for XpComponent {
    fn bucket(&self) -> ReadinessBucket {
        ReadinessBucket::Xp
    }

    fn max_points(&self) -> f64 {
        20.0
    }

    fn ratio(&self, unit: &Unit) -> f64 {
        unit.xp_level as f64 / MAX_XP_LEVEL as f64
    }
}

pub struct StarsComponent;

impl ReadinessComponent for StarsComponent {
    fn bucket(&self) -> ReadinessBucket {
        ReadinessBucket::Stars
    }

    fn max_points(&self) -> f64 {
        20.0
    }

    fn ratio(&self, unit: &Unit) -> f64 {
        unit.progression_index as f64 / MAX_PROGRESSION_INDEX as f64
    }
}

/// Average level of unlocked abilities only; locked ones do not drag it down
pub struct AbilitiesComponent;

impl ReadinessComponent for AbilitiesComponent {
    fn bucket(&self) -> ReadinessBucket {
        ReadinessBucket::Abilities
    }

    fn max_points(&self) -> f64 {
        20.0
    }

    fn ratio(&self, unit: &Unit) -> f64 {
        let levels: Vec<u32> = unit.unlocked_abilities().map(|a| a.level).collect();
        let avg = average(levels.iter().map(|&l| l as f64).sum(), levels.len());
        avg / MAX_ABILITY_LEVEL as f64
    }
}

/// Equip ratio times normalized average item level
pub struct ItemsComponent;

impl ReadinessComponent for ItemsComponent {
    fn bucket(&self) -> ReadinessBucket {
        ReadinessBucket::Items
    }

    fn max_points(&self) -> f64 {
        15.0
    }

    fn ratio(&self, unit: &Unit) -> f64 {
        let items = unit.equipped_items();
        let equip_ratio = items.len() as f64 / MAX_ITEM_SLOTS as f64;
        let avg_level = average(items.iter().map(|i| i.level as f64).sum(), items.len());
        equip_ratio * (avg_level / MAX_ITEM_LEVEL as f64).min(1.0)
    }
}

pub static DEFAULT_READINESS_COMPONENTS: [&dyn ReadinessComponent; 5] = [
    &RankComponent,
    &XpComponent,
    &StarsComponent,
    &AbilitiesComponent,
    &ItemsComponent,
];

/// Weighted 0-100 composite. Subscores are rounded one by one and the total
/// is the rounded sum of those rounded values.
pub fn calculate_readiness_score(unit: &Unit) -> ReadinessBreakdown {
    let mut breakdown = ReadinessBreakdown::default();

    for component in DEFAULT_READINESS_COMPONENTS.iter() {
        let score = component.score(unit);
        match component.bucket() {
            ReadinessBucket::Rank => breakdown.rank = score,
            ReadinessBucket::Xp => breakdown.xp = score,
            ReadinessBucket::Stars => breakdown.stars = score,
            ReadinessBucket::Abilities => breakdown.abilities = score,
            ReadinessBucket::Items => breakdown.items = score,
        }
    }

    breakdown.total = round1(
        breakdown.rank + breakdown.xp + breakdown.stars + breakdown.abilities + breakdown.items,
    );
    breakdown
}

/// Every unit with its breakdown, highest total first, ties by unit id
pub fn rank_units_by_readiness(units: &[Unit]) -> Vec<UnitReadiness> {
    rank_unit_refs_by_readiness(units)
        .into_iter()
        .map(|(_, readiness)| readiness)
        .collect()
}

/// Same ordering as [`rank_units_by_readiness`], each score paired with its unit
pub fn rank_unit_refs_by_readiness(units: &[Unit]) -> Vec<(&Unit, UnitReadiness)> {
    let mut ranked: Vec<(&Unit, UnitReadiness)> = units
        .iter()
        .map(|unit| {
            let readiness = UnitReadiness {
                unit_id: unit.id.clone(),
                name: unit.display_name().to_string(),
                breakdown: calculate_readiness_score(unit),
            };
            (unit, readiness)
        })
        .collect();

    ranked.sort_by(|(_, a), (_, b)| {
        b.breakdown
            .total
            .total_cmp(&a.breakdown.total)
            .then_with(|| a.unit_id.cmp(&b.unit_id))
    });
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Ability, EquippedItem};

    fn item(level: u32) -> EquippedItem {
        EquippedItem {
            slot_id: "Slot1".into(),
            id: "item".into(),
            level,
            ..EquippedItem::default()
        }
    }

    fn ability(level: u32) -> Ability {
        Ability {
            id: "ability".into(),
            level,
        }
    }

    fn maxed_unit() -> Unit {
        Unit {
            id: "maxed".into(),
            rank: 17,
            xp_level: 50,
            progression_index: 15,
            abilities: vec![ability(50), ability(50)],
            items: vec![item(11), item(11), item(11)],
            ..Unit::default()
        }
    }

    #[test]
    fn maxed_unit_scores_one_hundred() {
        let breakdown = calculate_readiness_score(&maxed_unit());

        assert_eq!(breakdown.rank, 25.0);
        assert_eq!(breakdown.xp, 20.0);
        assert_eq!(breakdown.stars, 20.0);
        assert_eq!(breakdown.abilities, 20.0);
        assert_eq!(breakdown.items, 15.0);
        assert_eq!(breakdown.total, 100.0);
    }

    #[test]
    fn empty_unit_scores_zero() {
        let breakdown = calculate_readiness_score(&Unit::default());
        assert_eq!(breakdown, ReadinessBreakdown::default());
    }

    #[test]
    fn rounds_each_subscore_before_summing() {
        let unit = Unit {
            id: "mid".into(),
            rank: 5,
            xp_level: 33,
            progression_index: 7,
            abilities: vec![ability(0), ability(21)],
            items: vec![item(5), item(8)],
            ..Unit::default()
        };

        let b = calculate_readiness_score(&unit);

        // 5/17*25 = 7.35..
        assert_eq!(b.rank, 7.4);
        // 33/50*20 = 13.2
        assert_eq!(b.xp, 13.2);
        // 7/15*20 = 9.33..
        assert_eq!(b.stars, 9.3);
        // only the unlocked ability counts: 21/50*20 = 8.4
        assert_eq!(b.abilities, 8.4);
        // (2/3) * (6.5/11) * 15 = 5.909..
        assert_eq!(b.items, 5.9);
        assert_eq!(b.total, round1(7.4 + 13.2 + 9.3 + 8.4 + 5.9));
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let mut unit = maxed_unit();
        unit.rank = 40;
        unit.items = vec![item(20), item(20), item(20), item(20)];

        let breakdown = calculate_readiness_score(&unit);
        assert_eq!(breakdown.rank, 25.0);
        assert_eq!(breakdown.items, 15.0);
        assert!(breakdown.total <= 100.0);
    }

    #[test]
    fn scoring_is_idempotent() {
        let unit = maxed_unit();
        assert_eq!(
            calculate_readiness_score(&unit),
            calculate_readiness_score(&unit)
        );
    }

    #[test]
    fn ranking_breaks_ties_by_unit_id() {
        let units = vec![
            Unit {
                id: "zeta".into(),
                rank: 3,
                ..Unit::default()
            },
            Unit {
                id: "alpha".into(),
                rank: 3,
                ..Unit::default()
            },
            maxed_unit(),
        ];

        let ids: Vec<String> = rank_units_by_readiness(&units)
            .into_iter()
            .map(|r| r.unit_id)
            .collect();
        assert_eq!(ids, vec!["maxed", "alpha", "zeta"]);
    }
}
