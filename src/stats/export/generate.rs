use std::collections::BTreeMap;

use crate::domain::{
    DamageType, GuildData, Inventory, Player, PlayerData, Progress, RaidEntry, SeasonRaidData, Unit,
};
use crate::stats::{
    analyze_campaign, average, calculate_ability_completion, calculate_alliance_strength,
    calculate_faction_strength, calculate_upgrade_completion, get_shards_to_next_star,
    identify_weaknesses, rank_unit_refs_by_readiness, round1, UnitReadiness,
};

use super::models::{
    CampaignSummary, GuildSummary, OverviewSection, RaidSection, RaidUnitDamage,
    ResourcesSection, RosterSection, StatsExport, TokenSummary, UpgradePriority,
};

const TOP_FACTIONS: usize = 10;
const TOP_READINESS_UNITS: usize = 10;
const TOP_RAID_UNITS: usize = 5;
const MAX_UPGRADE_PRIORITIES: usize = 5;

/// Builds the full snapshot for one player.
///
/// Returns `None` only when the player record is missing. Guild, raid and
/// inventory gaps produce partial sections instead of failing. Raid
/// performance covers the numerically highest season only, restricted to
/// attacks made by `user_id`.
pub fn generate_stats_export(
    player_data: &PlayerData,
    guild_data: Option<&GuildData>,
    season_raids: &SeasonRaidData,
    user_id: Option<&str>,
) -> Option<StatsExport> {
    let player = player_data.player.as_ref()?;
    let ranked = rank_unit_refs_by_readiness(&player.units);
    let readiness: Vec<UnitReadiness> = ranked.iter().map(|(_, r)| r.clone()).collect();

    Some(StatsExport {
        overview: build_overview(player, guild_data, user_id),
        roster: build_roster(&player.units, &readiness),
        resources: build_resources(&player.inventory),
        raid: user_id.and_then(|uid| build_raid_section(season_raids, uid)),
        upgrade_priorities: build_upgrade_priorities(&ranked),
    })
}

fn build_overview(
    player: &Player,
    guild_data: Option<&GuildData>,
    user_id: Option<&str>,
) -> OverviewSection {
    let units = &player.units;
    let count = units.len();
    let mean = |f: fn(&Unit) -> u32| round1(average(units.iter().map(|u| f(u) as f64).sum(), count));

    let mut rarity_counts = BTreeMap::new();
    for unit in units {
        *rarity_counts.entry(unit.rarity()).or_insert(0) += 1;
    }

    let guild = guild_data
        .and_then(|data| data.guild.as_ref())
        .map(|guild| GuildSummary {
            name: guild.name.clone(),
            tag: guild.guild_tag.clone(),
            level: guild.level,
            member_count: guild.members.len(),
            role: user_id.and_then(|uid| guild.member(uid)).map(|m| m.role),
        });

    OverviewSection {
        player_name: player.details.name.clone(),
        power_level: player.details.power_level,
        total_units: count,
        avg_rank: mean(|u| u.rank),
        avg_xp_level: mean(|u| u.xp_level),
        avg_stars: mean(|u| u.progression_index),
        rarity_counts,
        guild,
        tokens: build_tokens(&player.progress),
        campaigns: player
            .progress
            .campaigns
            .iter()
            .map(|campaign| {
                let analysis = analyze_campaign(campaign);
                CampaignSummary {
                    name: analysis.name,
                    campaign_type: analysis.campaign_type,
                    progress_percent: analysis.progress_percent,
                    walls: analysis.walls.len(),
                }
            })
            .collect(),
    }
}

fn build_tokens(progress: &Progress) -> Vec<TokenSummary> {
    progress
        .token_buckets()
        .into_iter()
        .map(|(mode, bucket)| TokenSummary {
            mode: mode.to_string(),
            current: bucket.current,
            max: bucket.max,
        })
        .collect()
}

fn build_roster(units: &[Unit], readiness: &[UnitReadiness]) -> RosterSection {
    let alliance_strength = calculate_alliance_strength(units);
    let weaknesses = identify_weaknesses(&alliance_strength);

    let mut faction_strength = calculate_faction_strength(units);
    faction_strength.truncate(TOP_FACTIONS);

    let completion_total: f64 = units
        .iter()
        .map(|u| calculate_ability_completion(u).completion_percent)
        .sum();

    RosterSection {
        alliance_strength,
        faction_strength,
        weaknesses,
        top_units: readiness.iter().take(TOP_READINESS_UNITS).cloned().collect(),
        avg_ability_completion: round1(average(completion_total, units.len())),
    }
}

fn build_resources(inventory: &Inventory) -> ResourcesSection {
    ResourcesSection {
        total_shards: inventory.total_shards(),
        total_upgrade_materials: inventory.total_upgrade_materials(),
        xp_books: inventory.xp_books_by_rarity(),
        ability_badges: inventory.ability_badges_by_alliance(),
        components: inventory.components_by_alliance(),
        orbs: inventory.orbs_by_alliance(),
        forge_badges: inventory.forge_badges_by_rarity(),
        requisition_orders: inventory.requisition_orders.clone(),
        reset_stones: inventory.reset_stones,
    }
}

fn build_raid_section(season_raids: &SeasonRaidData, user_id: &str) -> Option<RaidSection> {
    let (&season, raid) = season_raids.last_key_value()?;

    let entries: Vec<&RaidEntry> = raid
        .entries
        .iter()
        .filter(|e| e.user_id == user_id)
        .collect();

    let total_damage: u64 = entries.iter().map(|e| e.damage_dealt).sum();
    let total_power: u64 = entries.iter().map(|e| e.total_power()).sum();
    let bomb_attacks = entries
        .iter()
        .filter(|e| e.damage_type == DamageType::Bomb)
        .count();

    let average_efficiency = if total_power == 0 {
        0.0
    } else {
        total_damage as f64 / total_power as f64
    };

    Some(RaidSection {
        season,
        attacks: entries.len(),
        battle_attacks: entries.len() - bomb_attacks,
        bomb_attacks,
        total_damage,
        average_damage: average(total_damage as f64, entries.len()),
        average_efficiency,
        top_units: top_units_by_damage(&entries),
    })
}

/// Equal-credit damage per unit, best average first; unit id settles ties
fn top_units_by_damage(entries: &[&RaidEntry]) -> Vec<RaidUnitDamage> {
    let mut per_unit: BTreeMap<&str, (usize, f64)> = BTreeMap::new();

    for entry in entries {
        if entry.hero_details.is_empty() {
            continue;
        }
        let credited = entry.damage_dealt as f64 / entry.hero_details.len() as f64;
        for hero in &entry.hero_details {
            let tally = per_unit.entry(hero.unit_id.as_str()).or_default();
            tally.0 += 1;
            tally.1 += credited;
        }
    }

    let mut ranked: Vec<RaidUnitDamage> = per_unit
        .into_iter()
        .map(|(unit_id, (attacks, damage))| RaidUnitDamage {
            unit_id: unit_id.to_string(),
            attacks,
            average_damage: average(damage, attacks),
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.average_damage
            .total_cmp(&a.average_damage)
            .then_with(|| a.unit_id.cmp(&b.unit_id))
    });
    ranked.truncate(TOP_RAID_UNITS);
    ranked
}

/// Highest-readiness units that still have something left to invest in
fn build_upgrade_priorities(ranked: &[(&Unit, UnitReadiness)]) -> Vec<UpgradePriority> {
    ranked
        .iter()
        .filter_map(|(unit, readiness)| {
            let reasons = upgrade_reasons(unit);
            if reasons.is_empty() {
                return None;
            }
            Some(UpgradePriority {
                unit_id: readiness.unit_id.clone(),
                name: readiness.name.clone(),
                readiness: readiness.breakdown.total,
                reasons,
            })
        })
        .take(MAX_UPGRADE_PRIORITIES)
        .collect()
}

fn upgrade_reasons(unit: &Unit) -> Vec<String> {
    let mut reasons = Vec::new();

    if let Some(needed) = get_shards_to_next_star(unit.progression_index) {
        if unit.shards >= needed {
            reasons.push(format!(
                "can promote to next star ({}/{} shards)",
                unit.shards, needed
            ));
        }
    }

    let abilities = calculate_ability_completion(unit);
    if abilities.locked > 0 {
        reasons.push(format!("{} locked abilities", abilities.locked));
    }
    if abilities.unlocked > 0 && abilities.completion_percent < 100.0 {
        reasons.push(format!(
            "abilities at {:.1}% completion",
            abilities.completion_percent
        ));
    }

    let equipped = unit.equipped_items().len();
    if equipped < crate::constants::MAX_ITEM_SLOTS {
        reasons.push(format!(
            "{}/{} item slots equipped",
            equipped,
            crate::constants::MAX_ITEM_SLOTS
        ));
    }

    let upgrades = calculate_upgrade_completion(unit);
    if upgrades.filled < upgrades.total {
        reasons.push(format!(
            "{}/{} upgrade slots filled",
            upgrades.filled, upgrades.total
        ));
    }

    reasons
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        Ability, Alliance, EquippedItem, Guild, GuildMember, GuildRaidData, GuildRole, HeroDetail,
    };

    fn unit(id: &str, rank: u32, shards: u32) -> Unit {
        Unit {
            id: id.into(),
            name: Some(id.to_uppercase()),
            faction: Some("Ultramarines".into()),
            grand_alliance: Some(Alliance::Imperial),
            rank,
            xp_level: 30,
            progression_index: 4,
            abilities: vec![Ability {
                id: "active".into(),
                level: 20,
            }],
            shards,
            ..Unit::default()
        }
    }

    fn player_data(units: Vec<Unit>) -> PlayerData {
        PlayerData {
            player: Some(Player {
                units,
                ..Player::default()
            }),
        }
    }

    fn raid_entry(user: &str, damage: u64, heroes: &[(&str, u64)]) -> RaidEntry {
        RaidEntry {
            user_id: user.into(),
            damage_dealt: damage,
            hero_details: heroes
                .iter()
                .map(|(id, power)| HeroDetail {
                    unit_id: id.to_string(),
                    power: *power,
                })
                .collect(),
            ..RaidEntry::default()
        }
    }

    #[test]
    fn missing_player_yields_none() {
        let export =
            generate_stats_export(&PlayerData::default(), None, &SeasonRaidData::new(), None);
        assert!(export.is_none());
    }

    #[test]
    fn total_units_matches_roster_length() {
        let data = player_data(vec![unit("a", 3, 0), unit("b", 8, 0), unit("c", 1, 0)]);
        let export = generate_stats_export(&data, None, &SeasonRaidData::new(), None).unwrap();

        assert_eq!(export.overview.total_units, 3);
        assert_eq!(export.roster.alliance_strength.len(), 3);
        assert!(export.overview.guild.is_none());
        assert!(export.raid.is_none());
    }

    #[test]
    fn guild_summary_includes_player_role() {
        let guild = GuildData {
            guild: Some(Guild {
                name: "Iron Warriors".into(),
                guild_tag: "IW".into(),
                level: 9,
                members: vec![GuildMember {
                    user_id: "me".into(),
                    role: GuildRole::Officer,
                    ..GuildMember::default()
                }],
                ..Guild::default()
            }),
        };

        let export = generate_stats_export(
            &player_data(vec![]),
            Some(&guild),
            &SeasonRaidData::new(),
            Some("me"),
        )
        .unwrap();

        let summary = export.overview.guild.unwrap();
        assert_eq!(summary.member_count, 1);
        assert_eq!(summary.role, Some(GuildRole::Officer));
    }

    #[test]
    fn raid_section_uses_highest_season_and_filters_user() {
        let mut seasons = SeasonRaidData::new();
        seasons.insert(
            9,
            GuildRaidData {
                season: 9,
                entries: vec![raid_entry("me", 999_999, &[("old", 10)])],
                ..GuildRaidData::default()
            },
        );
        seasons.insert(
            10,
            GuildRaidData {
                season: 10,
                entries: vec![
                    raid_entry("me", 1000, &[("a", 100), ("b", 100)]),
                    raid_entry("me", 3000, &[("a", 100), ("c", 200)]),
                    raid_entry("someone-else", 50_000, &[("z", 10)]),
                ],
                ..GuildRaidData::default()
            },
        );

        let export =
            generate_stats_export(&player_data(vec![]), None, &seasons, Some("me")).unwrap();
        let raid = export.raid.unwrap();

        assert_eq!(raid.season, 10);
        assert_eq!(raid.attacks, 2);
        assert_eq!(raid.total_damage, 4000);
        assert_eq!(raid.average_damage, 2000.0);
        assert_eq!(raid.average_efficiency, 4000.0 / 500.0);

        let ids: Vec<&str> = raid.top_units.iter().map(|u| u.unit_id.as_str()).collect();
        // c: 1500, a: (500 + 1500) / 2 = 1000, b: 500
        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[test]
    fn raid_top_units_tie_break_on_unit_id() {
        let mut seasons = SeasonRaidData::new();
        seasons.insert(
            3,
            GuildRaidData {
                season: 3,
                entries: vec![raid_entry("me", 600, &[("y", 1), ("x", 1), ("w", 1)])],
                ..GuildRaidData::default()
            },
        );

        let export =
            generate_stats_export(&player_data(vec![]), None, &seasons, Some("me")).unwrap();
        let ids: Vec<String> = export
            .raid
            .unwrap()
            .top_units
            .into_iter()
            .map(|u| u.unit_id)
            .collect();
        assert_eq!(ids, vec!["w", "x", "y"]);
    }

    #[test]
    fn upgrade_priorities_explain_gaps() {
        let mut complete = unit("complete", 17, 0);
        complete.progression_index = 15;
        complete.abilities = vec![Ability {
            id: "a".into(),
            level: 50,
        }];
        complete.items = (0..3)
            .map(|_| EquippedItem {
                level: 11,
                ..EquippedItem::default()
            })
            .collect();
        complete.upgrades = vec![0, 1, 2, 3, 4, 5];

        let promotable = unit("promotable", 5, 500);

        let export = generate_stats_export(
            &player_data(vec![complete, promotable]),
            None,
            &SeasonRaidData::new(),
            None,
        )
        .unwrap();

        assert_eq!(export.upgrade_priorities.len(), 1);
        let priority = &export.upgrade_priorities[0];
        assert_eq!(priority.unit_id, "promotable");
        assert!(priority.reasons[0].starts_with("can promote to next star"));
    }

    #[test]
    fn upgrade_priorities_follow_each_ranked_unit_even_with_shared_ids() {
        let mut maxed = unit("dup", 17, 0);
        maxed.progression_index = 15;
        maxed.abilities = vec![Ability {
            id: "a".into(),
            level: 50,
        }];
        maxed.items = (0..3)
            .map(|_| EquippedItem {
                level: 11,
                ..EquippedItem::default()
            })
            .collect();
        maxed.upgrades = vec![0, 1, 2, 3, 4, 5];

        let growing = unit("dup", 2, 500);

        let export = generate_stats_export(
            &player_data(vec![maxed, growing]),
            None,
            &SeasonRaidData::new(),
            None,
        )
        .unwrap();

        assert_eq!(export.upgrade_priorities.len(), 1);
        assert!(export.upgrade_priorities[0].reasons[0].starts_with("can promote to next star"));
        assert!(export.upgrade_priorities[0].readiness < export.roster.top_units[0].breakdown.total);
    }
}
