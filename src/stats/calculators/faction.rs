use crate::domain::Unit;
use crate::stats::{average, round1, FactionStrengthData};

const UNKNOWN_FACTION: &str = "Unknown";

/// Groups units by faction, strongest average rank first.
/// Factions with equal averages keep first-seen order.
pub fn calculate_faction_strength(units: &[Unit]) -> Vec<FactionStrengthData> {
    // (faction, count, rank sum, xp sum) in first-seen order
    let mut groups: Vec<(&str, usize, u64, u64)> = Vec::new();

    for unit in units {
        let faction = unit.faction.as_deref().unwrap_or(UNKNOWN_FACTION);
        match groups.iter_mut().find(|(name, ..)| *name == faction) {
            Some(group) => {
                group.1 += 1;
                group.2 += unit.rank as u64;
                group.3 += unit.xp_level as u64;
            }
            None => groups.push((faction, 1, unit.rank as u64, unit.xp_level as u64)),
        }
    }

    let mut data: Vec<FactionStrengthData> = groups
        .into_iter()
        .map(|(faction, count, rank_sum, xp_sum)| FactionStrengthData {
            faction: faction.to_string(),
            unit_count: count,
            avg_rank: round1(average(rank_sum as f64, count)),
            avg_xp_level: round1(average(xp_sum as f64, count)),
        })
        .collect();

    // sort_by is stable
    data.sort_by(|a, b| b.avg_rank.total_cmp(&a.avg_rank));
    data
}
