use strum::IntoEnumIterator;

use crate::constants::STRONG_RANK_THRESHOLD;
use crate::domain::{Alliance, Unit};
use crate::stats::{average, round1, AllianceStrengthData, Weakness, WeaknessKind};

const MIN_STRONG_UNITS: usize = 5;
const MIN_ROSTER_SIZE: usize = 3;

/// Per-alliance strength, always one record for each of the three alliances.
/// Units without an alliance tag are left out of every bucket.
pub fn calculate_alliance_strength(units: &[Unit]) -> Vec<AllianceStrengthData> {
    Alliance::iter()
        .map(|alliance| {
            let members: Vec<&Unit> = units
                .iter()
                .filter(|u| u.grand_alliance == Some(alliance))
                .collect();
            let count = members.len();

            let sum = |f: fn(&Unit) -> u32| members.iter().map(|u| f(u) as f64).sum::<f64>();

            AllianceStrengthData {
                alliance,
                unit_count: count,
                avg_rank: round1(average(sum(|u| u.rank), count)),
                avg_xp_level: round1(average(sum(|u| u.xp_level), count)),
                avg_stars: round1(average(sum(|u| u.progression_index), count)),
                strong_units: members
                    .iter()
                    .filter(|u| u.rank > STRONG_RANK_THRESHOLD)
                    .count(),
            }
        })
        .collect()
}

/// Flags thin alliances. Each rule fires independently, so one alliance can
/// contribute two records.
pub fn identify_weaknesses(alliance_data: &[AllianceStrengthData]) -> Vec<Weakness> {
    let mut weaknesses = Vec::new();

    for data in alliance_data {
        if data.strong_units < MIN_STRONG_UNITS {
            weaknesses.push(Weakness {
                alliance: data.alliance,
                kind: WeaknessKind::FewStrongUnits,
                message: format!(
                    "{} has only {} units above Bronze rank",
                    data.alliance, data.strong_units
                ),
            });
        }

        if data.unit_count < MIN_ROSTER_SIZE {
            weaknesses.push(Weakness {
                alliance: data.alliance,
                kind: WeaknessKind::SmallRoster,
                message: format!(
                    "{} roster is thin with {} units",
                    data.alliance, data.unit_count
                ),
            });
        }
    }

    weaknesses
}
