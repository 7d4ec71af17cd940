use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CampaignType {
    #[default]
    Standard,
    Mirror,
    Elite,
    EliteMirror,
}

impl CampaignType {
    fn parse(raw: &str) -> Self {
        match raw {
            "Mirror" => CampaignType::Mirror,
            "Elite" => CampaignType::Elite,
            "EliteMirror" => CampaignType::EliteMirror,
            _ => CampaignType::Standard,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CampaignBattle {
    pub battle_index: u32,
    pub attempts_left: u32,
    pub attempts_used: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CampaignProgress {
    pub id: String,
    pub name: String,
    #[serde(rename = "type", deserialize_with = "lenient_campaign_type")]
    pub campaign_type: CampaignType,
    pub battles: Vec<CampaignBattle>,
}

fn lenient_campaign_type<'de, D>(deserializer: D) -> Result<CampaignType, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.map(|s| CampaignType::parse(&s)).unwrap_or_default())
}

/// A regenerating token pool for one game mode
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TokenBucket {
    pub current: u32,
    pub max: u32,
    pub next_token_in_seconds: Option<u64>,
    pub regen_delay_in_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ModeTokens {
    pub tokens: Option<TokenBucket>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GuildRaidTokens {
    pub tokens: Option<TokenBucket>,
    pub bomb_tokens: Option<TokenBucket>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Progress {
    pub campaigns: Vec<CampaignProgress>,
    pub arena: Option<ModeTokens>,
    pub guild_raid: Option<GuildRaidTokens>,
    pub onslaught: Option<ModeTokens>,
    pub salvage_run: Option<ModeTokens>,
}

fn mode_bucket(mode: &Option<ModeTokens>) -> Option<&TokenBucket> {
    mode.as_ref().and_then(|m| m.tokens.as_ref())
}

impl Progress {
    /// Named token buckets in a fixed display order; absent modes are skipped
    pub fn token_buckets(&self) -> Vec<(&'static str, &TokenBucket)> {
        let raid = self.guild_raid.as_ref();

        [
            ("Arena", mode_bucket(&self.arena)),
            ("Guild Raid", raid.and_then(|r| r.tokens.as_ref())),
            ("Guild Raid Bombs", raid.and_then(|r| r.bomb_tokens.as_ref())),
            ("Onslaught", mode_bucket(&self.onslaught)),
            ("Salvage Run", mode_bucket(&self.salvage_run)),
        ]
        .into_iter()
        .filter_map(|(name, bucket)| bucket.map(|b| (name, b)))
        .collect()
    }
}
