use std::collections::BTreeMap;
use std::fmt::Display;

use crate::constants;

use super::models::{
    OverviewSection, RaidSection, ResourcesSection, RosterSection, StatsExport, UpgradePriority,
};

pub const OVERVIEW_HEADER: &str = "=== PLAYER OVERVIEW ===";
pub const ROSTER_HEADER: &str = "=== ROSTER ANALYSIS ===";
pub const RESOURCES_HEADER: &str = "=== RESOURCES ===";
pub const RAID_HEADER: &str = "=== RAID PERFORMANCE ===";
pub const PRIORITIES_HEADER: &str = "=== UPGRADE PRIORITIES ===";

/// Flattens an export into labeled sections.
/// Downstream prompts depend on the header text and section order.
pub fn stats_export_to_string(export: &StatsExport) -> String {
    let sections = [
        overview_lines(&export.overview),
        roster_lines(&export.roster),
        resources_lines(&export.resources),
        raid_lines(export.raid.as_ref()),
        priority_lines(&export.upgrade_priorities),
    ];

    sections
        .iter()
        .map(|lines| lines.join("\n"))
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn overview_lines(overview: &OverviewSection) -> Vec<String> {
    let mut lines = vec![
        OVERVIEW_HEADER.to_string(),
        format!("Player: {}", overview.player_name),
        format!("Power Level: {}", overview.power_level),
        format!("Total Units: {}", overview.total_units),
        format!(
            "Average Rank: {:.1} ({})",
            overview.avg_rank,
            constants::rank_name(overview.avg_rank.round() as u32)
        ),
        format!("Average XP Level: {:.1}", overview.avg_xp_level),
        format!("Average Stars: {:.1}", overview.avg_stars),
    ];

    if !overview.rarity_counts.is_empty() {
        lines.push(format!("Rarity: {}", join_counts(&overview.rarity_counts)));
    }

    match &overview.guild {
        Some(guild) => {
            let role = guild
                .role
                .map(|r| format!(", role {:?}", r))
                .unwrap_or_default();
            lines.push(format!(
                "Guild: {} [{}] (Level {}, {} members{})",
                guild.name, guild.tag, guild.level, guild.member_count, role
            ));
        }
        None => lines.push("Guild: none".to_string()),
    }

    if !overview.tokens.is_empty() {
        let tokens: Vec<String> = overview
            .tokens
            .iter()
            .map(|t| format!("{} {}/{}", t.mode, t.current, t.max))
            .collect();
        lines.push(format!("Tokens: {}", tokens.join(", ")));
    }

    if !overview.campaigns.is_empty() {
        lines.push("Campaigns:".to_string());
        for campaign in &overview.campaigns {
            lines.push(format!(
                "- {} ({:?}): {}% complete, {} walls",
                campaign.name, campaign.campaign_type, campaign.progress_percent, campaign.walls
            ));
        }
    }

    lines
}

fn roster_lines(roster: &RosterSection) -> Vec<String> {
    let mut lines = vec![ROSTER_HEADER.to_string(), "Alliance Strength:".to_string()];

    for data in &roster.alliance_strength {
        lines.push(format!(
            "- {}: {} units, avg rank {:.1}, avg XP level {:.1}, avg stars {:.1}, {} strong",
            data.alliance,
            data.unit_count,
            data.avg_rank,
            data.avg_xp_level,
            data.avg_stars,
            data.strong_units
        ));
    }

    if !roster.faction_strength.is_empty() {
        lines.push("Top Factions:".to_string());
        for faction in &roster.faction_strength {
            lines.push(format!(
                "- {}: {} units, avg rank {:.1}, avg XP level {:.1}",
                faction.faction, faction.unit_count, faction.avg_rank, faction.avg_xp_level
            ));
        }
    }

    if !roster.weaknesses.is_empty() {
        lines.push("Weaknesses:".to_string());
        for weakness in &roster.weaknesses {
            lines.push(format!("- {}", weakness.message));
        }
    }

    if !roster.top_units.is_empty() {
        lines.push("Top Units by Readiness:".to_string());
        for unit in &roster.top_units {
            lines.push(format!(
                "- {} ({}): {:.1}/100",
                unit.name, unit.unit_id, unit.breakdown.total
            ));
        }
    }

    lines.push(format!(
        "Average Ability Completion: {:.1}%",
        roster.avg_ability_completion
    ));
    lines
}

fn resources_lines(resources: &ResourcesSection) -> Vec<String> {
    let mut lines = vec![
        RESOURCES_HEADER.to_string(),
        format!("Shards: {}", resources.total_shards),
        format!("Upgrade Materials: {}", resources.total_upgrade_materials),
    ];

    let categories = [
        ("XP Books", join_counts(&resources.xp_books)),
        ("Ability Badges", join_counts(&resources.ability_badges)),
        ("Components", join_counts(&resources.components)),
        ("Orbs", join_counts(&resources.orbs)),
        ("Forge Badges", join_counts(&resources.forge_badges)),
    ];
    for (label, counts) in categories {
        if !counts.is_empty() {
            lines.push(format!("{}: {}", label, counts));
        }
    }

    lines.push(format!(
        "Requisition Orders: {} regular, {} blessed",
        resources.requisition_orders.regular, resources.requisition_orders.blessed
    ));
    lines.push(format!("Reset Stones: {}", resources.reset_stones));
    lines
}

fn raid_lines(raid: Option<&RaidSection>) -> Vec<String> {
    let mut lines = vec![RAID_HEADER.to_string()];

    let Some(raid) = raid else {
        lines.push("No raid data available".to_string());
        return lines;
    };

    lines.push(format!("Season: {}", raid.season));
    lines.push(format!(
        "Attacks: {} (Battle {}, Bomb {})",
        raid.attacks, raid.battle_attacks, raid.bomb_attacks
    ));
    lines.push(format!("Total Damage: {}", raid.total_damage));
    lines.push(format!(
        "Average Damage per Attack: {:.0}",
        raid.average_damage
    ));
    lines.push(format!(
        "Average Efficiency: {:.2} damage per power",
        raid.average_efficiency
    ));

    if !raid.top_units.is_empty() {
        lines.push("Top Units by Damage:".to_string());
        for unit in &raid.top_units {
            lines.push(format!(
                "- {}: avg {:.0} over {} attacks",
                unit.unit_id, unit.average_damage, unit.attacks
            ));
        }
    }

    lines
}

fn priority_lines(priorities: &[UpgradePriority]) -> Vec<String> {
    let mut lines = vec![PRIORITIES_HEADER.to_string()];

    if priorities.is_empty() {
        lines.push("No outstanding upgrades".to_string());
    }
    for priority in priorities {
        lines.push(format!(
            "- {} (readiness {:.1}): {}",
            priority.name,
            priority.readiness,
            priority.reasons.join("; ")
        ));
    }

    lines
}

fn join_counts<K: Display>(counts: &BTreeMap<K, impl Display>) -> String {
    counts
        .iter()
        .map(|(key, value)| format!("{} {}", key, value))
        .collect::<Vec<_>>()
        .join(", ")
}
