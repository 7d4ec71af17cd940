use crate::constants;

/// Shards required to reach the next star.
/// `None` when the unit is maxed or the next star has no known cost.
pub fn get_shards_to_next_star(progression_index: u32) -> Option<u32> {
    constants::shards_for_star(progression_index.saturating_add(1))
}
