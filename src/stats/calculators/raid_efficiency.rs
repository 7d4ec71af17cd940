use std::collections::BTreeMap;

use crate::domain::RaidEntry;
use crate::stats::{average, UnitEfficiencyData};

/// Units need at least this many qualifying entries to be ranked
pub const MIN_RAIDS_FOR_RANKING: usize = 2;

#[derive(Default)]
struct UnitTally {
    raids: usize,
    damage: f64,
    efficiency: f64,
    power: f64,
}

/// Damage-per-power ranking across raid entries.
///
/// Only entries with non-zero team power qualify. Each entry's damage is
/// split equally between its heroes; upstream has no per-hero attribution.
/// Output is sorted by average efficiency, highest first, ties by unit id.
pub fn calculate_raid_efficiency(entries: &[RaidEntry]) -> Vec<UnitEfficiencyData> {
    let mut tallies: BTreeMap<&str, UnitTally> = BTreeMap::new();

    for entry in entries {
        let team_power = entry.total_power();
        if team_power == 0 || entry.hero_details.is_empty() {
            continue;
        }

        let damage = entry.damage_dealt as f64;
        let efficiency = damage / team_power as f64;
        let credited = damage / entry.hero_details.len() as f64;

        for hero in &entry.hero_details {
            let tally = tallies.entry(hero.unit_id.as_str()).or_default();
            tally.raids += 1;
            tally.damage += credited;
            tally.efficiency += efficiency;
            tally.power += hero.power as f64;
        }
    }

    let mut ranked: Vec<UnitEfficiencyData> = tallies
        .into_iter()
        .filter(|(_, tally)| tally.raids >= MIN_RAIDS_FOR_RANKING)
        .map(|(unit_id, tally)| UnitEfficiencyData {
            unit_id: unit_id.to_string(),
            raids: tally.raids,
            total_damage: tally.damage,
            average_damage: average(tally.damage, tally.raids),
            average_efficiency: average(tally.efficiency, tally.raids),
            average_power: average(tally.power, tally.raids),
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.average_efficiency
            .total_cmp(&a.average_efficiency)
            .then_with(|| a.unit_id.cmp(&b.unit_id))
    });
    ranked
}
