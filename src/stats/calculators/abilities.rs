use crate::constants::{MAX_ABILITY_LEVEL, UPGRADE_SLOTS};
use crate::domain::Unit;
use crate::stats::{round1, AbilityCompletion, UpgradeCompletion};

/// Completion of unlocked abilities toward max level.
/// No unlocked abilities means 0 %, with the locked count still reported.
pub fn calculate_ability_completion(unit: &Unit) -> AbilityCompletion {
    let unlocked = unit.unlocked_abilities().count();
    let locked = unit.abilities.len() - unlocked;
    let total_levels: u32 = unit.unlocked_abilities().map(|a| a.level).sum();

    let completion_percent = if unlocked == 0 {
        0.0
    } else {
        let max_levels = (unlocked as u32 * MAX_ABILITY_LEVEL) as f64;
        round1(total_levels as f64 / max_levels * 100.0)
    };

    AbilityCompletion {
        unlocked,
        locked,
        total_levels,
        completion_percent,
    }
}

pub fn calculate_upgrade_completion(unit: &Unit) -> UpgradeCompletion {
    let filled = unit.upgrade_slots_filled();
    UpgradeCompletion {
        filled,
        total: UPGRADE_SLOTS,
        completion_percent: round1(filled as f64 / UPGRADE_SLOTS as f64 * 100.0),
    }
}
