use crate::constants::FULL_CAMPAIGN_BATTLES;
use crate::domain::CampaignProgress;
use crate::stats::{average, round1, CampaignAnalysisData, CampaignWall};

/// A battle that burned more than this many attempts with none left is a wall
const WALL_ATTEMPTS_THRESHOLD: u32 = 5;

pub fn analyze_campaign(campaign: &CampaignProgress) -> CampaignAnalysisData {
    let battles = &campaign.battles;

    let max_battle_index = battles.iter().map(|b| b.battle_index).max().unwrap_or(0);
    let progress_percent =
        (max_battle_index as f64 / FULL_CAMPAIGN_BATTLES as f64 * 100.0).round() as u32;

    let mut walls: Vec<CampaignWall> = battles
        .iter()
        .filter(|b| b.attempts_used > WALL_ATTEMPTS_THRESHOLD && b.attempts_left == 0)
        .map(|b| CampaignWall {
            battle_index: b.battle_index,
            attempts_used: b.attempts_used,
        })
        .collect();
    walls.sort_by(|a, b| b.attempts_used.cmp(&a.attempts_used));

    let total_attempts_used: u32 = battles.iter().map(|b| b.attempts_used).sum();
    let attempted = battles.iter().filter(|b| b.attempts_used > 0).count();

    CampaignAnalysisData {
        id: campaign.id.clone(),
        name: campaign.name.clone(),
        campaign_type: campaign.campaign_type,
        battles_recorded: battles.len(),
        max_battle_index,
        progress_percent,
        total_attempts_used,
        walls,
        average_attempts: round1(average(total_attempts_used as f64, attempted)),
    }
}
