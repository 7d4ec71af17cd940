// Pure metric calculators. None of these fail: empty or missing input
// produces zeroed or empty output.

mod abilities;
mod alliance;
mod campaign;
mod faction;
mod raid_efficiency;
mod readiness;
mod shards;

pub use abilities::{calculate_ability_completion, calculate_upgrade_completion};
pub use alliance::{calculate_alliance_strength, identify_weaknesses};
pub use campaign::analyze_campaign;
pub use faction::calculate_faction_strength;
pub use raid_efficiency::{calculate_raid_efficiency, MIN_RAIDS_FOR_RANKING};
pub use readiness::{
    calculate_readiness_score, rank_unit_refs_by_readiness, rank_units_by_readiness, AbilitiesComponent, ItemsComponent,
    RankComponent, StarsComponent, XpComponent, DEFAULT_READINESS_COMPONENTS,
};
pub use shards::get_shards_to_next_star;
