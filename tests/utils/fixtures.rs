use serde_json::{json, Value};

use warroom::domain::{GuildData, GuildRaidData, PlayerData, SeasonRaidData};

// ============================================================================
// Upstream payload fixtures
// ============================================================================

pub const PLAYER_USER_ID: &str = "player-1";
pub const LATEST_SEASON: u32 = 71;
pub const PREVIOUS_SEASON: u32 = 70;

/// Player payload as the game API returns it, including a string damage field
/// elsewhere and unknown keys the domain model ignores
pub fn player_json() -> Value {
    json!({
        "player": {
            "details": { "name": "Marneus", "powerLevel": 48210 },
            "units": [
                {
                    "id": "ultraCalgar",
                    "name": "Marneus Calgar",
                    "faction": "Ultramarines",
                    "grandAlliance": "Imperial",
                    "progressionIndex": 9,
                    "xp": 120000,
                    "xpLevel": 40,
                    "rank": 12,
                    "abilities": [{ "id": "a1", "level": 30 }, { "id": "a2", "level": 0 }],
                    "upgrades": [0, 1, 2],
                    "items": [
                        { "slotId": "Slot1", "id": "I_Weapon", "level": 6, "rarity": "Rare" },
                        { "slotId": "Slot2", "id": "I_Armour", "level": 4, "rarity": "Uncommon" }
                    ],
                    "shards": 20,
                    "portraitUrl": "ignored"
                },
                {
                    "id": "ultraTigurius",
                    "name": "Varro Tigurius",
                    "faction": "Ultramarines",
                    "grandAlliance": "Imperial",
                    "progressionIndex": 6,
                    "xpLevel": 30,
                    "rank": 8,
                    "abilities": [{ "id": "a1", "level": 20 }, { "id": "a2", "level": 15 }],
                    "upgrades": [0, 1, 2, 3, 4, 5],
                    "items": [],
                    "shards": 5
                },
                {
                    "id": "necroImotekh",
                    "name": "Imotekh",
                    "faction": "Necrons",
                    "grandAlliance": "Xenos",
                    "progressionIndex": 12,
                    "xpLevel": 45,
                    "rank": 14,
                    "abilities": [{ "id": "a1", "level": 40 }, { "id": "a2", "level": 35 }],
                    "upgrades": [0, 1],
                    "items": [
                        { "slotId": "Slot1", "id": "I_Gauss", "level": 9 },
                        { "slotId": "Slot2", "id": "I_Shield", "level": 8 },
                        { "slotId": "Slot3", "id": "I_Relic", "level": 7 }
                    ],
                    "shards": 100
                },
                {
                    "id": "blackAbaddon",
                    "name": "Abaddon",
                    "faction": "Black Legion",
                    "grandAlliance": "Chaos",
                    "progressionIndex": 2,
                    "xpLevel": 10,
                    "rank": 3,
                    "abilities": [{ "id": "a1", "level": 5 }, { "id": "a2", "level": 0 }],
                    "shards": 0
                }
            ],
            "inventory": {
                "shards": [{ "id": "shard_ultraCalgar", "amount": 40 }],
                "xpBooks": [
                    { "id": "book_common", "rarity": "Common", "amount": 12 },
                    { "id": "book_rare", "rarity": "Rare", "amount": 3 }
                ],
                "requisitionOrders": { "regular": 4, "blessed": 1 },
                "resetStones": 2
            },
            "progress": {
                "campaigns": [
                    {
                        "id": "campaign1",
                        "name": "Indomitus",
                        "type": "Standard",
                        "battles": [
                            { "battleIndex": 1, "attemptsLeft": 0, "attemptsUsed": 6 },
                            { "battleIndex": 2, "attemptsLeft": 5, "attemptsUsed": 3 }
                        ]
                    }
                ],
                "arena": { "tokens": { "current": 3, "max": 5 } },
                "guildRaid": {
                    "tokens": { "current": 1, "max": 3 },
                    "bombTokens": { "current": 0, "max": 1 }
                }
            }
        }
    })
}

pub fn player_data() -> PlayerData {
    serde_json::from_value(player_json()).unwrap()
}

pub fn guild_data() -> GuildData {
    serde_json::from_value(json!({
        "guild": {
            "guildId": "g-1",
            "guildTag": "IWB",
            "name": "Iron Warband",
            "level": 10,
            "members": [
                { "userId": PLAYER_USER_ID, "role": "LEADER", "level": 50 },
                { "userId": "player-2", "role": "MEMBER", "level": 42 }
            ],
            "guildRaidSeasons": [PREVIOUS_SEASON, LATEST_SEASON]
        }
    }))
    .unwrap()
}

/// Latest season: two battle attacks and a bomb by the player, one attack by a guildmate
pub fn latest_raid() -> GuildRaidData {
    serde_json::from_value(json!({
        "season": LATEST_SEASON,
        "seasonConfigId": "S71",
        "entries": [
            {
                "userId": "player-2",
                "damageDealt": 999999,
                "damageType": "Battle",
                "heroDetails": [{ "unitId": "eldarMaugan", "power": 9000 }]
            },
            {
                "userId": PLAYER_USER_ID,
                "damageDealt": "120000",
                "damageType": "Battle",
                "heroDetails": [
                    { "unitId": "ultraCalgar", "power": 3000 },
                    { "unitId": "ultraTigurius", "power": 2000 }
                ]
            },
            {
                "userId": PLAYER_USER_ID,
                "damageDealt": 80000,
                "damageType": "Battle",
                "heroDetails": [
                    { "unitId": "ultraTigurius", "power": 2000 },
                    { "unitId": "ultraCalgar", "power": 3000 }
                ]
            },
            {
                "userId": PLAYER_USER_ID,
                "damageDealt": 50000,
                "damageType": "Bomb",
                "heroDetails": []
            }
        ]
    }))
    .unwrap()
}

/// Older season with much larger numbers, which must never leak into the summary
pub fn previous_raid() -> GuildRaidData {
    serde_json::from_value(json!({
        "season": PREVIOUS_SEASON,
        "entries": [
            {
                "userId": PLAYER_USER_ID,
                "damageDealt": 5000000,
                "heroDetails": [{ "unitId": "necroImotekh", "power": 1000 }]
            }
        ]
    }))
    .unwrap()
}

pub fn season_raids() -> SeasonRaidData {
    let mut seasons = SeasonRaidData::new();
    seasons.insert(PREVIOUS_SEASON, previous_raid());
    seasons.insert(LATEST_SEASON, latest_raid());
    seasons
}
