// Typed records for the upstream game API payloads.
// Everything here is a read-only snapshot; nothing is mutated after ingestion.

pub mod guild;
pub mod inventory;
pub mod player;
pub mod progress;
pub mod raid;
pub mod unit;

pub use guild::{Guild, GuildData, GuildMember, GuildRole};
pub use inventory::{
    AbilityBadge, Component, ForgeBadge, Inventory, InventoryItem, Orb, RequisitionOrders,
    ShardStack, UpgradeMaterial, XpBook,
};
pub use player::{Player, PlayerData, PlayerDetails};
pub use progress::{
    CampaignBattle, CampaignProgress, CampaignType, GuildRaidTokens, ModeTokens, Progress,
    TokenBucket,
};
pub use raid::{DamageType, GuildRaidData, HeroDetail, RaidEntry, SeasonRaidData};
pub use unit::{Ability, Alliance, EquippedItem, Rarity, Unit};
